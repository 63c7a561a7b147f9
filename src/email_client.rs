use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use std::time;

use crate::domain::coach_email::CoachEmail;

const REQUEST_TIMEOUT: time::Duration = time::Duration::from_secs(10);

pub struct EmailClient {
    http_client: Client,
    base_url: String,
    sender: CoachEmail,
    api_key: Secret<String>,
}

#[derive(serde::Serialize)]
pub struct SendEmailBody {
    from: String,
    to: Vec<String>,
    subject: String,
    html: String,
    text: String,
}

#[derive(serde::Deserialize)]
struct SendEmailResponse {
    id: String,
}

impl EmailClient {
    pub fn new(
        base_url: String,
        sender: CoachEmail,
        api_key: Secret<String>,
        timeout: Option<time::Duration>,
    ) -> EmailClient {
        let http_client = Client::builder()
            .timeout(timeout.unwrap_or(REQUEST_TIMEOUT))
            .build()
            .unwrap();

        EmailClient {
            http_client,
            base_url,
            sender,
            api_key,
        }
    }

    /// Sends one email and returns the provider message id.
    pub async fn send_email(
        &self,
        recipent: &CoachEmail,
        subject: &str,
        html_content: &str,
        text_content: &str,
    ) -> Result<String, reqwest::Error> {
        let url = format!("{}/emails", self.base_url);
        let body = SendEmailBody {
            from: String::from(self.sender.as_ref()),
            to: vec![String::from(recipent.as_ref())],
            subject: String::from(subject),
            html: String::from(html_content),
            text: String::from(text_content),
        };

        let response = self
            .http_client
            .post(&url)
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .json(&body)
            .send()
            .await?
            .error_for_status()?; // return an error when server response status code is 4xx or 5xx

        let response_body: SendEmailResponse = response.json().await?;

        Ok(response_body.id)
    }
}
