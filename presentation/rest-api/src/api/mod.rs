pub mod chat {
    pub mod dto;
    pub mod error_mapper;
    pub mod routes;
}
pub mod error;
pub mod health {
    pub mod routes;
}
pub mod host_guard;
pub mod tags;
