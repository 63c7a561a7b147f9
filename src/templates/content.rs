//! One content block per email type. Subjects carry the A/B variant, the
//! body blocks are assembled into the shared layout.

use super::layout;
use super::{RenderedEmail, TemplateData};
use crate::domain::variant::Variant;

pub fn welcome(data: &TemplateData, variant: Variant) -> RenderedEmail {
    let subject = match variant {
        Variant::A => "🎉 Willkommen bei KI-Coaching! Dein Trial startet jetzt",
        Variant::B => "🎉 Schön, dass du da bist! Dein 14-Tage Trial ist aktiv",
    };
    let cta_label = match variant {
        Variant::A => "Jetzt Dashboard öffnen 🚀",
        Variant::B => "Direkt loslegen 🚀",
    };

    let content = format!(
        r#"<div class="highlight-box">
  <h2>Hallo {first_name}! 👋</h2>
  <p>Schön, dass du dabei bist! Dein KI-Coaching Trial ist ab sofort aktiv.</p>
</div>

{trial_status}

<h3>🚀 Deine nächsten Schritte:</h3>
<div class="step">
  <strong>1. Dashboard erkunden</strong><br>
  Logge dich in dein persönliches Dashboard ein und schaue dir die verfügbaren Tools an.
</div>
<div class="step">
  <strong>2. Erste KI-Sitzung starten</strong><br>
  Teste unser Hauptfeature - die KI-gestützte Coaching-Sitzung mit deinem ersten Klienten.
</div>
<div class="step">
  <strong>3. Templates erkunden</strong><br>
  Entdecke unsere vorgefertigten Coaching-Templates für verschiedene Situationen.
</div>

{cta}

<div style="margin-top: 30px; padding: 20px; background: #fff3cd; border-radius: 5px;">
  <h4>💡 Tipp: Maximiere dein Trial</h4>
  <p>In den nächsten 14 Tagen senden wir dir hilfreiche Tipps und Tutorials, damit du das Beste aus deinem Trial herausholst.</p>
</div>"#,
        first_name = data.first_name,
        trial_status = layout::trial_status(data),
        cta = layout::cta_button(&data.login_url, cta_label),
    );

    let html = layout::document(
        "linear-gradient(135deg, #667eea 0%, #764ba2 100%)",
        "#667eea",
        "🎉 Willkommen bei KI-Coaching!",
        "Dein 14-Tage Trial startet jetzt",
        &content,
        data,
    );

    let text = format!(
        "Willkommen bei KI-Coaching!\n\n\
         Hallo {first_name}!\n\n\
         Schön, dass du dabei bist! Dein KI-Coaching Trial ist ab sofort aktiv.\n\n\
         Deine nächsten Schritte:\n\
         1. Dashboard erkunden\n\
         2. Erste KI-Sitzung starten\n\
         3. Templates erkunden\n\n\
         {footer}",
        first_name = data.first_name,
        footer = layout::text_footer(data),
    );

    RenderedEmail {
        subject: subject.to_string(),
        html,
        text,
    }
}

pub fn day1(data: &TemplateData, variant: Variant) -> RenderedEmail {
    let subject = match variant {
        Variant::A => "📋 Erste Schritte erfolgreich? Hier ist deine Checkliste",
        Variant::B => "📋 Dein Tag-1 Check-in: vier Dinge, die du testen solltest",
    };

    let content = format!(
        r#"<p>Hallo {first_name}!</p>

<p>Gestern hast du dich für unser KI-Coaching Trial registriert. Wunderbar! 🎉</p>

<h3>✅ Hast du schon alles ausprobiert?</h3>
<div class="step">🔐 Dashboard Login</div>
<div class="step">🤖 Erste KI-Coaching Sitzung</div>
<div class="step">📝 Template Bibliothek angeschaut</div>
<div class="step">⚙️ Profil konfiguriert</div>

<p>Falls du Unterstützung brauchst, sind wir da! Antworte einfach auf diese Email.</p>

{trial_status}

{cta}"#,
        first_name = data.first_name,
        trial_status = layout::trial_status(data),
        cta = layout::cta_button(&data.login_url, "Weiter im Dashboard →"),
    );

    let html = layout::document(
        "#28a745",
        "#28a745",
        "📋 Tag 1 Check-in",
        "Wie laufen deine ersten Schritte?",
        &content,
        data,
    );

    let text = format!(
        "Tag 1 Check-in\n\n\
         Hallo {first_name}!\n\n\
         Wie laufen deine ersten Schritte mit KI-Coaching?\n\n\
         Checkliste:\n\
         - Dashboard Login\n\
         - Erste KI-Coaching Sitzung\n\
         - Template Bibliothek\n\
         - Profil konfiguriert\n\n\
         {footer}",
        first_name = data.first_name,
        footer = layout::text_footer(data),
    );

    RenderedEmail {
        subject: subject.to_string(),
        html,
        text,
    }
}

pub fn day3(data: &TemplateData, variant: Variant) -> RenderedEmail {
    let subject = match variant {
        Variant::A => "🚀 Wie läuft dein Trial? Brauchst du Unterstützung?",
        Variant::B => "🚀 3 Tage KI-Coaching - holst du schon alles raus?",
    };

    let content = format!(
        r#"<p>Hallo {first_name}! 👋</p>

<p>Drei Tage KI-Coaching - Zeit für einen kurzen Zwischenstand. Läuft alles rund?</p>

<div class="highlight-box">
  <h4>💬 Wir helfen dir persönlich</h4>
  <p>Antworte einfach auf diese Email und beschreibe, wo du hängst. Unser Team meldet sich innerhalb eines Werktags.</p>
</div>

<h3>Die häufigsten Fragen nach drei Tagen:</h3>
<div class="step">Wie importiere ich meine bestehenden Klienten?</div>
<div class="step">Wie passe ich die Coaching-Templates an meinen Stil an?</div>
<div class="step">Wie teile ich Sitzungsergebnisse mit Klienten?</div>

{trial_status}

{cta}"#,
        first_name = data.first_name,
        trial_status = layout::trial_status(data),
        cta = layout::cta_button(&data.login_url, "Zurück ins Dashboard →"),
    );

    let html = layout::document(
        "#17a2b8",
        "#17a2b8",
        "🚀 Wie läuft dein Trial?",
        "Tag 3 - Zeit für einen Zwischenstand",
        &content,
        data,
    );

    let text = format!(
        "Wie läuft dein Trial?\n\n\
         Hallo {first_name}!\n\n\
         Drei Tage KI-Coaching - läuft alles rund? Antworte einfach auf diese\n\
         Email, wenn du Unterstützung brauchst.\n\n\
         Häufige Fragen nach drei Tagen:\n\
         - Klienten importieren\n\
         - Templates anpassen\n\
         - Ergebnisse mit Klienten teilen\n\n\
         {footer}",
        first_name = data.first_name,
        footer = layout::text_footer(data),
    );

    RenderedEmail {
        subject: subject.to_string(),
        html,
        text,
    }
}

pub fn day7(data: &TemplateData, variant: Variant) -> RenderedEmail {
    let subject = match variant {
        Variant::A => "⏰ Halbzeit! Entdecke jetzt die Advanced Features",
        Variant::B => "⏰ 7 Tage geschafft - diese Features kennst du noch nicht",
    };

    let content = format!(
        r#"<p>Hi {first_name}! 👋</p>

<p>Du bist bereits eine Woche dabei - großartig! Zeit, die Advanced Features zu entdecken:</p>

<div class="highlight-box">
  <h4>🧠 KI-Persönlichkeitsanalyse</h4>
  <p>Lass die KI Persönlichkeitsprofile deiner Klienten erstellen für gezielteren Coaching-Ansatz.</p>
</div>

<div class="highlight-box">
  <h4>📊 Coaching-Analytics</h4>
  <p>Verfolge den Fortschritt deiner Klienten mit automatischen Analysen und Insights.</p>
</div>

<div class="highlight-box">
  <h4>🎯 Ziel-Tracking</h4>
  <p>Setze und verfolge SMART-Ziele mit KI-Unterstützung für bessere Ergebnisse.</p>
</div>

{trial_status}

{cta}"#,
        first_name = data.first_name,
        trial_status = layout::trial_status(data),
        cta = layout::cta_button(&data.login_url, "Advanced Features testen 🚀"),
    );

    let html = layout::document(
        "#ff6b35",
        "#ff6b35",
        "⏰ Halbzeit erreicht!",
        "7 Tage Trial - Zeit für Advanced Features",
        &content,
        data,
    );

    let text = format!(
        "Halbzeit erreicht!\n\n\
         Hi {first_name}!\n\n\
         7 Tage Trial - Zeit für Advanced Features:\n\
         - KI-Persönlichkeitsanalyse\n\
         - Coaching-Analytics\n\
         - Ziel-Tracking\n\n\
         {footer}",
        first_name = data.first_name,
        footer = layout::text_footer(data),
    );

    RenderedEmail {
        subject: subject.to_string(),
        html,
        text,
    }
}

pub fn day10(data: &TemplateData, variant: Variant) -> RenderedEmail {
    let subject = match variant {
        Variant::A => "🎯 Nur noch 4 Tage - Zeit für dein Upgrade!",
        Variant::B => "🎯 Dein Trial endet bald - sichere dir deinen Zugang",
    };
    let cta_label = match variant {
        Variant::A => "Jetzt upgraden 🎯",
        Variant::B => "Zugang sichern 🎯",
    };

    let content = format!(
        r#"<p>Hallo {first_name}!</p>

<p>Dein Trial neigt sich dem Ende zu. Damit du nahtlos weiterarbeiten kannst, lohnt sich jetzt der Blick auf ein Upgrade.</p>

<h3>Was du mit dem vollen Zugang behältst:</h3>
<div class="step">🤖 Unbegrenzte KI-Coaching Sitzungen</div>
<div class="step">📝 Alle Templates und eigene Vorlagen</div>
<div class="step">📊 Analytics und Verlaufshistorie deiner Klienten</div>

{trial_status}

{cta}

<p style="color: #666; font-size: 14px;">Dein Upgrade übernimmt alle Daten aus dem Trial - nichts geht verloren.</p>"#,
        first_name = data.first_name,
        trial_status = layout::trial_status(data),
        cta = layout::cta_button(&data.login_url, cta_label),
    );

    let html = layout::document(
        "#e83e8c",
        "#e83e8c",
        "🎯 Dein Trial endet bald",
        "Zeit, deinen Zugang zu sichern",
        &content,
        data,
    );

    let text = format!(
        "Dein Trial endet bald\n\n\
         Hallo {first_name}!\n\n\
         Damit du nahtlos weiterarbeiten kannst, lohnt sich jetzt das Upgrade.\n\n\
         Mit dem vollen Zugang behältst du:\n\
         - Unbegrenzte KI-Coaching Sitzungen\n\
         - Alle Templates und eigene Vorlagen\n\
         - Analytics und Verlaufshistorie\n\n\
         {footer}",
        first_name = data.first_name,
        footer = layout::text_footer(data),
    );

    RenderedEmail {
        subject: subject.to_string(),
        html,
        text,
    }
}

pub fn day13(data: &TemplateData, variant: Variant) -> RenderedEmail {
    let subject = match variant {
        Variant::A => "🔥 Letzter Tag! Upgrade jetzt und spare 20%",
        Variant::B => "🔥 Morgen ist Schluss - 20% Rabatt nur heute",
    };

    let content = format!(
        r#"<p>Hallo {first_name}!</p>

<p>Morgen endet dein KI-Coaching Trial. Heute bekommst du unser bestes Angebot:</p>

<div class="highlight-box">
  <h3>🔥 20% Rabatt auf dein erstes Jahr</h3>
  <p>Nur heute gültig. Der Rabatt wird beim Upgrade automatisch angewendet.</p>
</div>

{trial_status}

{cta}

<p style="color: #666; font-size: 14px;">Nach Trial-Ende bleiben deine Daten 30 Tage erhalten - du verlierst also nichts, wenn du dich später entscheidest.</p>"#,
        first_name = data.first_name,
        trial_status = layout::trial_status(data),
        cta = layout::cta_button(&data.login_url, "Jetzt mit 20% Rabatt upgraden 🔥"),
    );

    let html = layout::document(
        "#dc3545",
        "#dc3545",
        "🔥 Letzter Tag deines Trials",
        "Upgrade heute und spare 20%",
        &content,
        data,
    );

    let text = format!(
        "Letzter Tag deines Trials\n\n\
         Hallo {first_name}!\n\n\
         Morgen endet dein KI-Coaching Trial. Nur heute: 20% Rabatt auf dein\n\
         erstes Jahr, automatisch beim Upgrade angewendet.\n\n\
         Deine Daten bleiben nach Trial-Ende 30 Tage erhalten.\n\n\
         {footer}",
        first_name = data.first_name,
        footer = layout::text_footer(data),
    );

    RenderedEmail {
        subject: subject.to_string(),
        html,
        text,
    }
}

pub fn day15(data: &TemplateData, variant: Variant) -> RenderedEmail {
    let subject = match variant {
        Variant::A => "⚡ Trial abgelaufen - Reaktiviere in 2 Klicks",
        Variant::B => "⚡ Dein Zugang pausiert - reaktiviere KI-Coaching jetzt",
    };

    let content = format!(
        r#"<p>Hallo {first_name}!</p>

<p>Dein KI-Coaching Trial ist abgelaufen und dein Zugang pausiert. Deine Sitzungen, Templates und Klientendaten sind weiterhin sicher gespeichert.</p>

<div class="highlight-box">
  <h4>⚡ In 2 Klicks zurück</h4>
  <p>Logge dich ein und wähle einen Plan - alle Daten aus deinem Trial sind sofort wieder da.</p>
</div>

{trial_status}

{cta}"#,
        first_name = data.first_name,
        trial_status = layout::trial_status(data),
        cta = layout::cta_button(&data.login_url, "Zugang reaktivieren ⚡"),
    );

    let html = layout::document(
        "#6c757d",
        "#6c757d",
        "⚡ Dein Trial ist abgelaufen",
        "Reaktiviere deinen Zugang in 2 Klicks",
        &content,
        data,
    );

    let text = format!(
        "Dein Trial ist abgelaufen\n\n\
         Hallo {first_name}!\n\n\
         Dein Zugang pausiert, deine Daten sind weiterhin sicher gespeichert.\n\
         Logge dich ein und wähle einen Plan - alles ist sofort wieder da.\n\n\
         {footer}",
        first_name = data.first_name,
        footer = layout::text_footer(data),
    );

    RenderedEmail {
        subject: subject.to_string(),
        html,
        text,
    }
}
