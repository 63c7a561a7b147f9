//! Shared document chrome for the HTML and text bodies. Per-type content
//! blocks live in `content.rs`.

use super::TemplateData;

/// Wraps per-type content into the full HTML document: header banner,
/// content area, support footer.
pub fn document(
    header_background: &str,
    accent: &str,
    title: &str,
    subtitle: &str,
    content: &str,
    data: &TemplateData,
) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{title}</title>
  <style>
    body {{ font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; line-height: 1.6; color: #333; margin: 0; padding: 0; background-color: #f8f9fa; }}
    .container {{ max-width: 600px; margin: 0 auto; background: white; border-radius: 8px; overflow: hidden; box-shadow: 0 4px 6px rgba(0,0,0,0.1); }}
    .header {{ background: {header_background}; color: white; padding: 40px 30px; text-align: center; }}
    .header h1 {{ margin: 0; font-size: 28px; font-weight: 300; }}
    .content {{ padding: 40px 30px; }}
    .highlight-box {{ background: #f8f9ff; border-left: 4px solid {accent}; padding: 20px; margin: 20px 0; border-radius: 4px; }}
    .trial-info {{ background: #e8f5e8; border: 1px solid #4caf50; padding: 20px; border-radius: 5px; margin: 20px 0; }}
    .cta-button {{ display: inline-block; background: {accent}; color: white; padding: 15px 30px; text-decoration: none; border-radius: 5px; font-weight: 600; margin: 20px 0; }}
    .step {{ margin: 15px 0; padding: 15px; background: #f8f9fa; border-radius: 5px; }}
    .footer {{ background: #f8f9fa; padding: 30px; text-align: center; color: #666; font-size: 14px; }}
  </style>
</head>
<body>
  <div class="container">
    <div class="header">
      <h1>{title}</h1>
      <p>{subtitle}</p>
    </div>

    <div class="content">
{content}
    </div>

    <div class="footer">
      <p>Fragen? Antworte einfach auf diese Email oder schreibe an <a href="mailto:{support}">{support}</a></p>
      <p>KI-Coaching Team 🤖</p>
    </div>
  </div>
</body>
</html>"#,
        header_background = header_background,
        accent = accent,
        title = title,
        subtitle = subtitle,
        content = content,
        support = data.support_email,
    )
}

/// Trial status box every email carries, so html and text stay in sync on
/// dates.
pub fn trial_status(data: &TemplateData) -> String {
    if data.days_remaining > 0 {
        format!(
            r#"<div class="trial-info">
  <h3>📅 Dein Trial im Überblick</h3>
  <p><strong>Trial Ende:</strong> {end}</p>
  <p><strong>Verbleibende Tage:</strong> {days}</p>
</div>"#,
            end = data.trial_end_date,
            days = data.days_remaining,
        )
    } else {
        format!(
            r#"<div class="trial-info">
  <h3>📅 Dein Trial im Überblick</h3>
  <p><strong>Dein Trial ist am {end} abgelaufen.</strong></p>
</div>"#,
            end = data.trial_end_date,
        )
    }
}

pub fn cta_button(url: &str, label: &str) -> String {
    format!(
        r#"<div style="text-align: center;">
  <a href="{url}" class="cta-button">{label}</a>
</div>"#,
        url = url,
        label = label,
    )
}

/// Closing lines of every text body: trial status, dashboard link, support
/// contact. Mirrors the html footer plus the trial-info box.
pub fn text_footer(data: &TemplateData) -> String {
    let trial_line = if data.days_remaining > 0 {
        format!(
            "Dein Trial läuft bis zum {} ({} Tage verbleibend).",
            data.trial_end_date, data.days_remaining
        )
    } else {
        format!("Dein Trial ist am {} abgelaufen.", data.trial_end_date)
    };

    format!(
        "{trial_line}\n\nDashboard: {login_url}\n\nFragen? {support}\n\nKI-Coaching Team",
        trial_line = trial_line,
        login_url = data.login_url,
        support = data.support_email,
    )
}
