use crate::config::AppEnvironment;
use crate::errors::ResetError;

/// Proof that a human confirmed wiping a specific, non-production database.
///
/// The only constructor is [`ResetAuthorization::confirm`]; the loader will not
/// delete anything without one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetAuthorization {
    database: String,
}

impl ResetAuthorization {
    /// `confirmation` must repeat the target database name exactly.
    pub fn confirm(
        target: &str,
        confirmation: &str,
        environment: AppEnvironment,
    ) -> Result<Self, ResetError> {
        if !environment.allows_reset() {
            return Err(ResetError::ProductionEnvironment {
                database: target.to_string(),
            });
        }
        if confirmation != target {
            return Err(ResetError::ConfirmationMismatch {
                database: target.to_string(),
                given: confirmation.to_string(),
            });
        }
        Ok(Self {
            database: target.to_string(),
        })
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn check_target(&self, target: &str) -> Result<(), ResetError> {
        if self.database == target {
            Ok(())
        } else {
            Err(ResetError::TargetMismatch {
                authorised: self.database.clone(),
                target: target.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_confirmation_authorises_the_target() {
        let auth = ResetAuthorization::confirm("heimdall_dev", "heimdall_dev", AppEnvironment::Development)
            .unwrap();
        assert_eq!(auth.database(), "heimdall_dev");
        assert!(auth.check_target("heimdall_dev").is_ok());
    }

    #[test]
    fn production_is_refused_even_when_confirmed() {
        let err = ResetAuthorization::confirm("heimdall", "heimdall", AppEnvironment::Production)
            .unwrap_err();
        assert_eq!(
            err,
            ResetError::ProductionEnvironment {
                database: "heimdall".into()
            }
        );
    }

    #[test]
    fn confirmation_must_match_exactly() {
        let err = ResetAuthorization::confirm("heimdall_dev", "HEIMDALL_DEV", AppEnvironment::Test)
            .unwrap_err();
        assert!(matches!(err, ResetError::ConfirmationMismatch { .. }));
    }

    #[test]
    fn authorisation_does_not_transfer_to_another_database() {
        let auth = ResetAuthorization::confirm("heimdall_dev", "heimdall_dev", AppEnvironment::Test)
            .unwrap();
        let err = auth.check_target("heimdall").unwrap_err();
        assert_eq!(
            err.to_string(),
            "reset was authorised for 'heimdall_dev' but the loader targets 'heimdall'"
        );
    }
}
