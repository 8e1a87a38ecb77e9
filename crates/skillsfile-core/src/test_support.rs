//! Record builders shared by unit tests.

use crate::models::{
    AchievedQualification, Company, CompanyRequest, RequiredQualification, SampleQualification,
    Status, Timestamp, User,
};

fn stamp(raw: &str) -> Option<Timestamp> {
    Timestamp::parse_optional(raw).unwrap()
}

pub fn qualification(uid: &str, updated: &str) -> RequiredQualification {
    RequiredQualification {
        uid: uid.to_string(),
        name: format!("Qualification {uid}"),
        intro: String::new(),
        category_name: "Safety".to_string(),
        expires_months: 12,
        status: Status::Live,
        accreditor: String::new(),
        reference: None,
        parent_uid: None,
        created: stamp("2023-01-01"),
        creator: "U1".to_string(),
        updated: stamp(updated),
        updator: String::new(),
        synced: false,
        company_requests: Vec::new(),
    }
}

pub fn company(uid: &str, updated: &str) -> Company {
    Company {
        uid: uid.to_string(),
        name: format!("Company {uid}"),
        status: Status::Live,
        created: stamp("2023-01-01"),
        creator: "U1".to_string(),
        updated: stamp(updated),
        updator: String::new(),
        synced: false,
    }
}

pub fn company_request(company_uid: &str, updated: &str) -> CompanyRequest {
    CompanyRequest {
        creator: company_uid.to_string(),
        creator_name: format!("Company {company_uid}"),
        created: stamp("2023-06-01"),
        updated: stamp(updated),
        updator: String::new(),
    }
}

pub fn user(uid: &str, updated: &str) -> User {
    User {
        uid: uid.to_string(),
        first_name: "Sam".to_string(),
        last_name: "Taylor".to_string(),
        username: format!("user-{uid}"),
        status: Status::Live,
        created: stamp("2023-01-01"),
        creator: String::new(),
        updated: stamp(updated),
        updator: String::new(),
        synced: false,
    }
}

pub fn sample(uid: &str, updated: &str) -> SampleQualification {
    SampleQualification {
        uid: uid.to_string(),
        name: format!("Sample {uid}"),
        parent_uid: "Q1".to_string(),
        reference: "SAMPLE".to_string(),
        expires_months: 24,
        achieved: chrono::NaiveDate::from_ymd_opt(2023, 3, 1),
        status: Status::Live,
        created: stamp("2023-01-01"),
        creator: String::new(),
        updated: stamp(updated),
        updator: String::new(),
        synced: false,
    }
}

pub fn achieved(uid: &str, updated: &str) -> AchievedQualification {
    AchievedQualification {
        uid: uid.to_string(),
        name: format!("Achieved {uid}"),
        parent_uid: "Q1".to_string(),
        reference: "CERT-1".to_string(),
        expires_months: 12,
        achieved: chrono::NaiveDate::from_ymd_opt(2024, 1, 15),
        status: Status::Live,
        created: stamp("2024-01-15"),
        creator: "U1".to_string(),
        updated: stamp(updated),
        updator: String::new(),
        synced: false,
    }
}
