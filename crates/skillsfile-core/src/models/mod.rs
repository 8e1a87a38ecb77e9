//! Data models for SkillsFile

/// Implements `Reconcilable` for a record merged on its `uid` column.
macro_rules! uid_keyed {
    ($ty:ty, $entity_type:expr) => {
        impl crate::reconcile::Reconcilable for $ty {
            type Key = String;

            const ENTITY_TYPE: crate::models::EntityType = $entity_type;

            fn key(&self) -> String {
                self.uid.clone()
            }

            fn label(&self) -> String {
                self.uid.clone()
            }

            fn updated(&self) -> Option<crate::models::Timestamp> {
                self.updated
            }

            fn synced(&self) -> bool {
                self.synced
            }

            fn set_synced(&mut self, synced: bool) {
                self.synced = synced;
            }

            fn validate(&self) -> ::std::result::Result<(), String> {
                crate::reconcile::require_key("uid", &self.uid)
            }
        }
    };
}

mod achievement;
mod company;
mod entity_type;
mod qualification;
mod request;
mod status;
pub mod timestamp;
mod user;

pub use achievement::{AchievedQualification, NewAchievement, SampleQualification};
pub use company::Company;
pub use entity_type::EntityType;
pub use qualification::{CompanyRequest, RequiredQualification};
pub use request::QualificationCompanyRequest;
pub use status::Status;
pub use timestamp::Timestamp;
pub use user::User;
