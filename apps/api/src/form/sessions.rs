use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

use crate::errors::AppError;
use crate::form::orchestrator::FormOrchestrator;

/// Open forms keyed by session id. Each orchestrator is only touched while
/// the map lock is held, and the lock is never held across an await.
#[derive(Clone, Default)]
pub struct FormSessions {
    inner: Arc<Mutex<HashMap<Uuid, FormOrchestrator>>>,
}

impl FormSessions {
    pub async fn open(&self, form: FormOrchestrator) -> Uuid {
        let id = Uuid::new_v4();
        self.inner.lock().await.insert(id, form);
        id
    }

    /// Runs `f` against the form, or fails with 404 for an unknown id.
    pub async fn with<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut FormOrchestrator) -> T,
    ) -> Result<T, AppError> {
        let mut forms = self.inner.lock().await;
        let form = forms
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Form {id} not found")))?;
        Ok(f(form))
    }

    pub async fn close(&self, id: Uuid) -> bool {
        self.inner.lock().await.remove(&id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::recruit::Applicant;
    use chrono::Duration;

    fn form() -> FormOrchestrator {
        FormOrchestrator::new(
            Applicant {
                seq: "123".to_string(),
                ..Default::default()
            },
            Duration::milliseconds(3000),
        )
    }

    #[tokio::test]
    async fn test_open_with_close() {
        let sessions = FormSessions::default();
        let id = sessions.open(form()).await;
        assert_eq!(sessions.len().await, 1);

        let seq = sessions
            .with(id, |f| f.applicant().seq.clone())
            .await
            .unwrap();
        assert_eq!(seq, "123");

        assert!(sessions.close(id).await);
        assert!(!sessions.close(id).await);
        assert!(matches!(
            sessions.with(id, |_| ()).await,
            Err(AppError::NotFound(_))
        ));
    }
}
