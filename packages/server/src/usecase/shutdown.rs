//! UseCase: サーバー停止時の後始末

use super::SharedRegistry;

/// Registry を破棄するユースケース
pub struct ShutdownUseCase {
    registry: SharedRegistry,
}

impl ShutdownUseCase {
    pub fn new(registry: SharedRegistry) -> Self {
        Self { registry }
    }

    pub async fn execute(&self) {
        self.registry.lock().await.shutdown();
    }
}
