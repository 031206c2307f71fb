//! Core logic for terrarium environment lifecycle management
//!
//! This crate sequences configuration lookups and container runtime calls:
//! create/start/exec/stop/reset/remove for one named environment at a time,
//! with existence checks so `start` and `exec` create the container first
//! when it is absent.

mod error;
mod manager;

pub use error::*;
pub use manager::*;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

#[cfg(test)]
mod tests {
    use crate::test_support::{MockCall, MockRuntime};
    use crate::{CoreError, EnvironmentManager};
    use std::sync::{Arc, Mutex};
    use terrarium_config::{EnvironmentConfig, EnvironmentStore};

    fn test_config() -> EnvironmentConfig {
        let mut config = EnvironmentConfig::template();
        config.name = "web".to_string();
        config.image = "nginx:latest".to_string();
        config
    }

    fn manager_with(
        mock: MockRuntime,
    ) -> (
        tempfile::TempDir,
        Arc<Mutex<Vec<MockCall>>>,
        EnvironmentManager,
    ) {
        let tmp = tempfile::tempdir().unwrap();
        let store = EnvironmentStore::new(tmp.path());
        store.save("demo", &test_config()).unwrap();
        let calls = mock.calls.clone();
        let manager = EnvironmentManager::with_store(store, Box::new(mock));
        (tmp, calls, manager)
    }

    #[tokio::test]
    async fn test_create_fails_when_container_exists() {
        let (_tmp, _calls, manager) = manager_with(MockRuntime::new());
        let result = manager.create("demo").await;
        assert!(matches!(result, Err(CoreError::ContainerExists(name)) if name == "web"));
    }

    #[tokio::test]
    async fn test_create_when_absent() {
        let (_tmp, calls, manager) = manager_with(MockRuntime::without_container());
        manager.create("demo").await.unwrap();
        assert!(calls.lock().unwrap().contains(&MockCall::Create {
            container: "web".to_string(),
            image: "nginx:latest".to_string(),
        }));
    }

    #[tokio::test]
    async fn test_start_creates_first_when_absent() {
        let (_tmp, calls, manager) = manager_with(MockRuntime::without_container());
        manager.start("demo").await.unwrap();

        let calls = calls.lock().unwrap();
        let create_pos = calls
            .iter()
            .position(|c| matches!(c, MockCall::Create { .. }))
            .expect("start should create the missing container");
        let start_pos = calls
            .iter()
            .position(|c| matches!(c, MockCall::Start { .. }))
            .expect("start should start the container");
        assert!(create_pos < start_pos);
    }

    #[tokio::test]
    async fn test_start_skips_create_when_present() {
        let (_tmp, calls, manager) = manager_with(MockRuntime::new());
        manager.start("demo").await.unwrap();

        let calls = calls.lock().unwrap();
        assert!(!calls.iter().any(|c| matches!(c, MockCall::Create { .. })));
        assert!(calls.contains(&MockCall::Start {
            container: "web".to_string(),
            options: String::new(),
        }));
    }

    #[tokio::test]
    async fn test_exec_returns_exit_code() {
        let mock = MockRuntime::new();
        *mock.exec_exit_code.lock().unwrap() = 42;
        let (_tmp, calls, manager) = manager_with(mock);

        let code = manager.exec("demo", "EXEC-NAME").await.unwrap();
        assert_eq!(code, 42);
        assert!(calls.lock().unwrap().contains(&MockCall::Exec {
            container: "web".to_string(),
            profile: "EXEC-NAME".to_string(),
        }));
    }

    #[tokio::test]
    async fn test_exec_unknown_profile_fails_before_runtime() {
        let (_tmp, calls, manager) = manager_with(MockRuntime::new());
        let result = manager.exec("demo", "nope").await;
        assert!(matches!(
            result,
            Err(CoreError::ExecProfileNotFound { profile, .. }) if profile == "nope"
        ));
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remove_tears_down_and_deletes_config() {
        let (_tmp, calls, manager) = manager_with(MockRuntime::new());
        manager.remove("demo").await.unwrap();

        let calls = calls.lock().unwrap();
        assert!(calls.contains(&MockCall::Stop {
            container: "web".to_string()
        }));
        assert!(calls.contains(&MockCall::Remove {
            container: "web".to_string()
        }));
        assert!(manager.list().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remove_without_container_still_deletes_config() {
        let (_tmp, calls, manager) = manager_with(MockRuntime::without_container());
        manager.remove("demo").await.unwrap();

        let calls = calls.lock().unwrap();
        assert!(!calls.iter().any(|c| matches!(c, MockCall::Stop { .. })));
        assert!(!calls.iter().any(|c| matches!(c, MockCall::Remove { .. })));
        assert!(manager.list().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reset_stops_and_removes_in_order() {
        // The mock keeps reporting the container as present, so the final
        // create refuses. The teardown ordering is what matters here.
        let (_tmp, calls, manager) = manager_with(MockRuntime::new());
        let result = manager.reset("demo").await;
        assert!(matches!(result, Err(CoreError::ContainerExists(_))));

        let recorded = calls.lock().unwrap();
        let stop_pos = recorded
            .iter()
            .position(|c| matches!(c, MockCall::Stop { .. }))
            .unwrap();
        let remove_pos = recorded
            .iter()
            .position(|c| matches!(c, MockCall::Remove { .. }))
            .unwrap();
        assert!(stop_pos < remove_pos);
    }

    #[tokio::test]
    async fn test_reset_absent_container_just_creates() {
        let (_tmp, calls, manager) = manager_with(MockRuntime::without_container());
        manager.reset("demo").await.unwrap();

        let recorded = calls.lock().unwrap();
        assert!(!recorded.iter().any(|c| matches!(c, MockCall::Stop { .. })));
        assert!(recorded.iter().any(|c| matches!(
            c,
            MockCall::Create { container, .. } if container == "web"
        )));
    }

    #[tokio::test]
    async fn test_setup_saves_config_and_creates() {
        let tmp = tempfile::tempdir().unwrap();
        let store = EnvironmentStore::new(tmp.path());
        let mock = MockRuntime::without_container();
        let calls = mock.calls.clone();
        let manager = EnvironmentManager::with_store(store, Box::new(mock));

        manager.setup("demo", &test_config()).await.unwrap();

        assert_eq!(manager.list().unwrap(), vec!["demo".to_string()]);
        assert!(calls.lock().unwrap().iter().any(|c| matches!(
            c,
            MockCall::Create { container, .. } if container == "web"
        )));
    }

    #[tokio::test]
    async fn test_config_missing_environment() {
        let (_tmp, _calls, manager) = manager_with(MockRuntime::new());
        assert!(manager.config("missing").is_err());
    }
}
