use serde::Deserialize;

/// Limits applied when validating account fields. Loaded from the JSON file
/// named by `ACCOUNT_CONFIG`; absent keys fall back to the defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AccountRules {
    pub min_username_length: usize,
    pub max_username_length: usize,
    pub min_password_length: usize,
    pub max_password_length: usize,
    pub max_email_length: usize,
}

impl Default for AccountRules {
    fn default() -> Self {
        Self {
            min_username_length: 3,
            max_username_length: 32,
            min_password_length: 8,
            max_password_length: 256,
            max_email_length: 254,
        }
    }
}

impl AccountRules {
    pub fn check(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.min_username_length >= 1 && self.min_username_length <= self.max_username_length,
            "min_username_length must be between 1 and max_username_length"
        );
        anyhow::ensure!(
            self.min_password_length >= 1 && self.min_password_length <= self.max_password_length,
            "min_password_length must be between 1 and max_password_length"
        );
        anyhow::ensure!(self.max_email_length >= 6, "max_email_length is too small");
        Ok(())
    }
}
