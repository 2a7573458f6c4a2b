use serde::{Deserialize, Serialize};

pub const JOB_SEEKER: i32 = 1;
pub const EMPLOYER: i32 = 2;

/// Fixed role enumeration, seeded at startup and never mutated by request flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    JobSeeker,
    Employer,
}

impl Role {
    pub fn from_id(id: i32) -> Option<Self> {
        match id {
            JOB_SEEKER => Some(Role::JobSeeker),
            EMPLOYER => Some(Role::Employer),
            _ => None,
        }
    }

    pub fn id(&self) -> i32 {
        match self {
            Role::JobSeeker => JOB_SEEKER,
            Role::Employer => EMPLOYER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_id_round_trip() {
        assert_eq!(Role::from_id(1), Some(Role::JobSeeker));
        assert_eq!(Role::from_id(2), Some(Role::Employer));
        assert_eq!(Role::from_id(7), None);
        assert_eq!(Role::Employer.id(), 2);
    }
}
