use actix_web::web;
use serde::Deserialize;

use crate::domain::coach_email::CoachEmail;
use crate::domain::coach_name::CoachName;

pub struct NewCoach {
    pub name: CoachName,
    pub email: CoachEmail,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub coaching_experience: Option<String>,
    pub bio: Option<String>,
}

#[derive(Deserialize)]
pub struct RegisterBody {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub coaching_experience: Option<String>,
    pub bio: Option<String>,
}

impl TryFrom<web::Json<RegisterBody>> for NewCoach {
    type Error = String;

    fn try_from(body: web::Json<RegisterBody>) -> Result<Self, Self::Error> {
        let name = CoachName::parse(body.name.clone())?;
        let email = CoachEmail::parse(body.email.clone())?;

        Ok(NewCoach {
            name,
            email,
            phone: body.phone.clone(),
            company: body.company.clone(),
            coaching_experience: body.coaching_experience.clone(),
            bio: body.bio.clone(),
        })
    }
}
