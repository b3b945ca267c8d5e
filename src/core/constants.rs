pub const DEFAULT_BASE_URL: &str = "https://message-app-backend-t3-2025-v2.vercel.app/api";

pub const BASE_URL_ENV: &str = "ROOMCHAT_BASE_URL";
pub const CONFIG_DIR_ENV: &str = "ROOMCHAT_CONFIG_DIR";
