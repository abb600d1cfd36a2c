pub const APP_NAME: &str = "bloglist";

pub mod users {

    pub const MIN_USERNAME_LENGTH: usize = 3;

    pub const MIN_PASSWORD_LENGTH: usize = 3;
}

pub mod store {
    use std::time::Duration;

    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    pub const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

    pub const IDLE_TIMEOUT: Duration = Duration::from_secs(300);

    pub const MAX_LIFETIME: Duration = Duration::from_secs(600);

    /// An in-memory database lives only as long as its single connection.
    pub const IN_MEMORY_LIFETIME: Duration = Duration::from_secs(60 * 60 * 24 * 365);
}
