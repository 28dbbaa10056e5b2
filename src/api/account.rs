//! Account endpoints: nickname management, account deletion, and the
//! credential check used by `ladle login`.

use crate::api::{ApiClient, ApiError};

impl ApiClient {
    /// Check whether a nickname is already taken. `true` means taken.
    pub async fn check_nickname_taken(&self, nickname: &str) -> Result<bool, ApiError> {
        let url = self.endpoint("auth/check-nickname")?;
        let request = self.http().get(url).query(&[("name", nickname)]);
        self.send_json::<bool>(request).await
    }

    /// Save a new nickname for the signed-in account.
    pub async fn change_nickname(&self, nickname: &str) -> Result<(), ApiError> {
        let url = self.endpoint("auth/change-nickname")?;
        let request = self
            .http()
            .post(url)
            .json(&serde_json::json!({ "nickName": nickname }));
        let request = self.authorize(request)?;

        self.send(request).await?;
        tracing::info!(nickname, "Nickname changed");
        Ok(())
    }

    /// Delete the signed-in account on the server. The caller is responsible
    /// for removing the local session file afterwards.
    pub async fn delete_account(&self) -> Result<(), ApiError> {
        let url = self.endpoint("auth/delete-user")?;
        let request = self.authorize(self.http().post(url))?;

        self.send(request).await?;
        tracing::info!("Account deleted");
        Ok(())
    }

    /// Validate the stored credentials by issuing the cheapest authorized
    /// read. Used by `ladle login` before persisting a token/email pair.
    pub async fn validate_session(&self) -> Result<(), ApiError> {
        self.fetch_liked_set().await.map(|_| ())
    }
}
