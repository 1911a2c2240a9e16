//! API path catalog

pub const JWT_CREATE: &str = "/api/auth/jwt/create/";
pub const JWT_REFRESH: &str = "/api/auth/jwt/refresh/";
pub const JWT_VERIFY: &str = "/api/auth/jwt/verify/";

pub const USER_REGISTER: &str = "/api/users/reg/";
pub const USER_CHANGE_PASSWORD: &str = "/api/users/change-passwd/";
pub const USER_ME: &str = "/api/users/me/";

pub const FOOD_CATEGORIES: &str = "/api/food/dicts/foodcategory/";
pub const FOOD_TAGS: &str = "/api/food/dicts/tag/";
pub const FOOD_ANTITAGS: &str = "/api/food/dicts/antitag/";
/// Menu listing; filters are appended as a query string
pub const FOOD_MENU: &str = "/api/food";
pub const FOOD_CREATE: &str = "/api/food/";

pub const PLATES: &str = "/api/plate/";

pub fn dish(id: i64) -> String {
    format!("/api/food/{}", id)
}

pub fn plate(id: i64) -> String {
    format!("/api/plate/{}", id)
}
