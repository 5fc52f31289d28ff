pub mod api;
pub mod local;

pub use api::RoomApi;
pub use local::LocalRoomApi;
