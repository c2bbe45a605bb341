//! UseCase: ルーム詳細取得処理

use std::sync::Arc;

use crate::domain::{Room, RoomDirectory, RoomKey};

use super::error::GetRoomDetailError;

/// ルーム詳細取得のユースケース
pub struct GetRoomDetailUseCase {
    /// Room Directory（ルーム状態の抽象化）
    directory: Arc<dyn RoomDirectory>,
}

impl GetRoomDetailUseCase {
    /// 新しい GetRoomDetailUseCase を作成
    pub fn new(directory: Arc<dyn RoomDirectory>) -> Self {
        Self { directory }
    }

    /// ルーム詳細を取得
    pub async fn execute(&self, key: &RoomKey) -> Result<Room, GetRoomDetailError> {
        self.directory
            .get_room(key)
            .await
            .ok_or(GetRoomDetailError::RoomNotFound)
    }
}
