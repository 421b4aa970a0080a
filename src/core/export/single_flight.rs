//! In-process single-flight registry keyed on export identity

use crate::domain::ids::JobId;
use crate::domain::job::ExportIdentity;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Tracks which identities currently have a job in flight
#[derive(Debug, Clone, Default)]
pub struct InFlight {
    jobs: Arc<Mutex<HashMap<ExportIdentity, JobId>>>,
}

impl InFlight {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `identity` for `job_id`
    ///
    /// Returns the held claim, or the ID of the job already in flight.
    pub fn claim(&self, identity: &ExportIdentity, job_id: JobId) -> Result<Claim, JobId> {
        let mut jobs = self.lock();
        if let Some(existing) = jobs.get(identity) {
            return Err(*existing);
        }
        jobs.insert(identity.clone(), job_id);
        Ok(Claim {
            registry: self.clone(),
            identity: identity.clone(),
        })
    }

    /// Number of identities in flight
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing is in flight
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<ExportIdentity, JobId>> {
        // the map stays consistent even if a holder panicked
        self.jobs.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Held claim; released on drop
#[derive(Debug)]
pub struct Claim {
    registry: InFlight,
    identity: ExportIdentity,
}

impl Drop for Claim {
    fn drop(&mut self) {
        self.registry.lock().remove(&self.identity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ids::{ExportType, RequesterId};
    use crate::domain::job::Audience;

    fn identity(requester: &str) -> ExportIdentity {
        ExportIdentity::new(
            ExportType::new("DailyAttendance").unwrap(),
            RequesterId::new(requester).unwrap(),
            Audience::NormalUser,
            None,
        )
    }

    #[test]
    fn test_second_claim_sees_first_job() {
        let registry = InFlight::new();
        let first = JobId::new_v4();

        let claim = registry.claim(&identity("u1"), first).unwrap();
        assert_eq!(
            registry.claim(&identity("u1"), JobId::new_v4()).unwrap_err(),
            first
        );
        assert!(registry.claim(&identity("u2"), JobId::new_v4()).is_ok());

        drop(claim);
        assert!(registry.claim(&identity("u1"), JobId::new_v4()).is_ok());
    }

    #[test]
    fn test_claim_released_on_drop() {
        let registry = InFlight::new();
        {
            let _claim = registry.claim(&identity("u1"), JobId::new_v4()).unwrap();
            assert_eq!(registry.len(), 1);
        }
        assert!(registry.is_empty());
    }
}
