//! UseCase: ルーム一覧取得処理

use std::sync::Arc;

use crate::domain::{Room, RoomDirectory};

/// ルーム一覧取得のユースケース
pub struct GetRoomsUseCase {
    /// Room Directory（ルーム状態の抽象化）
    directory: Arc<dyn RoomDirectory>,
}

impl GetRoomsUseCase {
    /// 新しい GetRoomsUseCase を作成
    pub fn new(directory: Arc<dyn RoomDirectory>) -> Self {
        Self { directory }
    }

    /// ルーム一覧を取得（キー順）
    pub async fn execute(&self) -> Vec<Room> {
        self.directory.list_rooms().await
    }
}
