//! 测试公共模块
//! 进程内的假 API（axum）和客户端构造辅助函数

#![allow(dead_code)]

use axum::{
    extract::{Path, RawQuery, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tokio::net::TcpListener;
use zojnik_client::{ApiClient, ClientConfig, CredentialStore};

pub const USER_EMAIL: &str = "bob@example.com";
pub const USER_PASSWORD: &str = "Secret123";

/// 假 API 的内存状态
#[derive(Default)]
pub struct FakeState {
    pub passwords: HashMap<String, String>,
    pub profiles: HashMap<String, Value>,
    pub access_tokens: HashMap<String, String>,
    pub refresh_tokens: HashMap<String, String>,
    pub dishes: BTreeMap<i64, Value>,
    pub plates: BTreeMap<i64, Value>,
    pub menu_queries: Vec<Option<String>>,
    pub issued: u64,
    pub next_id: i64,
}

impl FakeState {
    fn issue(&mut self, email: &str) -> (String, String) {
        self.issued += 1;
        let access = format!("access.{}.{}", self.issued, email.replace('@', "-"));
        let refresh = format!("refresh.{}.{}", self.issued, email.replace('@', "-"));
        self.access_tokens.insert(access.clone(), email.to_string());
        self.refresh_tokens.insert(refresh.clone(), email.to_string());
        (access, refresh)
    }

    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn add_user(&mut self, email: &str, password: &str, extra: &Value) -> Value {
        let id = self.next_id();
        let profile = json!({
            "id": id,
            "email": email,
            "username": extra.get("username").cloned().unwrap_or(json!("")),
            "first_name": extra.get("first_name").cloned().unwrap_or(json!("")),
            "last_name": extra.get("last_name").cloned().unwrap_or(json!("")),
            "phone_number": extra.get("phone_number").cloned().unwrap_or(json!("")),
            "profile": {},
        });
        self.passwords.insert(email.to_string(), password.to_string());
        self.profiles.insert(email.to_string(), profile.clone());
        profile
    }

    fn add_dish(&mut self, mut dish: Value) -> Value {
        let id = self.next_id();
        dish["id"] = json!(id);
        self.dishes.insert(id, dish.clone());
        dish
    }
}

type Shared = Arc<Mutex<FakeState>>;

/// 正在运行的假 API
pub struct FakeApi {
    pub base_url: String,
    pub state: Shared,
}

impl FakeApi {
    /// 直接签发一个访问令牌（跳过登录）
    pub fn issue_access_token(&self, email: &str) -> String {
        self.state.lock().unwrap().issue(email).0
    }

    pub fn last_menu_query(&self) -> Option<String> {
        self.state
            .lock()
            .unwrap()
            .menu_queries
            .last()
            .cloned()
            .flatten()
    }

    /// 种子数据中的 (蛋白质, 配菜, 蔬菜) 菜品 id
    pub fn seeded_components(&self) -> (i64, i64, i64) {
        let state = self.state.lock().unwrap();
        let ids: Vec<i64> = state.dishes.keys().copied().collect();
        (ids[0], ids[1], ids[2])
    }
}

/// 启动假 API，监听随机端口
pub async fn spawn_fake_api() -> FakeApi {
    let mut state = FakeState::default();
    state.add_user(USER_EMAIL, USER_PASSWORD, &json!({"username": "bob"}));
    for (name, category, calories, price) in [
        ("Куриное филе", "PROTEIN_PRODUCTS", 165.0, 250.0),
        ("Гречка", "GARNISH", 110.0, 90.0),
        ("Огурцы", "VEGETABLES", 15.0, 60.0),
    ] {
        state.add_dish(json!({
            "name": name,
            "calories": calories,
            "protein": 0.0,
            "fat": 0.0,
            "carbohydrates": 0.0,
            "allergen": false,
            "other": null,
            "price": price,
            "rating": 4,
            "avatar": null,
            "category": category,
        }));
    }

    let shared: Shared = Arc::new(Mutex::new(state));

    let app = Router::new()
        .route("/api/auth/jwt/create/", post(create_token))
        .route("/api/auth/jwt/refresh/", post(refresh_token))
        .route("/api/auth/jwt/verify/", post(verify_token))
        .route("/api/users/reg/", post(register))
        .route("/api/users/change-passwd/", post(change_password))
        .route("/api/users/me/", get(get_me).patch(patch_me))
        .route("/api/food/dicts/foodcategory/", get(categories))
        .route("/api/food/dicts/tag/", get(tags))
        .route("/api/food/dicts/antitag/", get(antitags))
        .route("/api/food", get(menu))
        .route("/api/food/", post(create_dish))
        .route("/api/food/{id}", get(get_dish).patch(patch_dish))
        .route("/api/plate/", get(list_plates).post(create_plate))
        .route("/api/plate/{id}", get(get_plate))
        .route("/test/plain", get(plain_text))
        .route("/test/echo", post(echo).get(echo_get))
        .with_state(shared.clone());

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fake API");
    let addr = listener.local_addr().expect("Failed to read local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Fake API crashed");
    });

    FakeApi {
        base_url: format!("http://{}", addr),
        state: shared,
    }
}

/// 创建指向假 API 的客户端，凭据文件内容为 `credentials`
pub fn client_for(api: &FakeApi, credentials: &str) -> (TempDir, ApiClient) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join(".env");
    std::fs::write(&path, credentials).expect("Failed to write credential file");

    let config = ClientConfig::with_base_url(&api.base_url).expect("Invalid test config");
    let store = CredentialStore::load(&path).expect("Failed to load credential store");
    let client = ApiClient::new(&config, store).expect("Failed to build client");
    (dir, client)
}

/// 已登录的客户端
pub fn authorized_client(api: &FakeApi) -> (TempDir, ApiClient) {
    let token = api.issue_access_token(USER_EMAIL);
    client_for(
        api,
        &format!(
            "valid_email={}\nvalid_password={}\nvalid_access_token={}\n",
            USER_EMAIL, USER_PASSWORD, token
        ),
    )
}

// ==================== 假 API 处理器 ====================

fn reply(status: StatusCode, body: Value) -> Response {
    (status, Json(body)).into_response()
}

fn unauthorized() -> Response {
    reply(
        StatusCode::UNAUTHORIZED,
        json!({"detail": "Given token not valid for any token type", "code": "token_not_valid"}),
    )
}

fn not_found() -> Response {
    reply(StatusCode::NOT_FOUND, json!({"detail": "Not found."}))
}

fn authorize(state: &FakeState, headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?;
    state.access_tokens.get(token).cloned()
}

fn merge(target: &mut Value, patch: &Value) {
    if let (Some(target), Some(patch)) = (target.as_object_mut(), patch.as_object()) {
        for (k, v) in patch {
            if k != "id" {
                target.insert(k.clone(), v.clone());
            }
        }
    }
}

async fn create_token(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut state = state.lock().unwrap();
    let username = body["username"].as_str().unwrap_or_default().to_string();
    let password = body["password"].as_str().unwrap_or_default();

    if state.passwords.get(&username).map(String::as_str) != Some(password) {
        return reply(
            StatusCode::UNAUTHORIZED,
            json!({"detail": "No active account found with the given credentials"}),
        );
    }

    let (access, refresh) = state.issue(&username);
    reply(StatusCode::OK, json!({"access": access, "refresh": refresh}))
}

async fn refresh_token(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut state = state.lock().unwrap();
    let refresh = body["refresh"].as_str().unwrap_or_default();

    match state.refresh_tokens.remove(refresh) {
        Some(email) => {
            let (access, rotated) = state.issue(&email);
            reply(StatusCode::OK, json!({"access": access, "refresh": rotated}))
        }
        None => reply(
            StatusCode::UNAUTHORIZED,
            json!({"detail": "Token is invalid or expired", "code": "token_not_valid"}),
        ),
    }
}

async fn verify_token(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let state = state.lock().unwrap();
    let token = body["token"].as_str().unwrap_or_default();

    if state.access_tokens.contains_key(token) || state.refresh_tokens.contains_key(token) {
        reply(StatusCode::OK, json!({}))
    } else {
        unauthorized()
    }
}

async fn register(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut state = state.lock().unwrap();
    let email = body["email"].as_str().unwrap_or_default().to_string();
    let password = body["password"].as_str().unwrap_or_default().to_string();

    if email.is_empty() || password.is_empty() {
        return reply(
            StatusCode::BAD_REQUEST,
            json!({"email": ["This field may not be blank."]}),
        );
    }
    if state.passwords.contains_key(&email) {
        return reply(
            StatusCode::BAD_REQUEST,
            json!({"email": ["user with this email already exists."]}),
        );
    }

    let profile = state.add_user(&email, &password, &body);
    reply(StatusCode::CREATED, profile)
}

async fn change_password(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    let Some(email) = authorize(&state, &headers) else {
        return unauthorized();
    };

    let old = body["old_password"].as_str().unwrap_or_default();
    let new = body["new_password"].as_str().unwrap_or_default().to_string();
    if state.passwords.get(&email).map(String::as_str) != Some(old) {
        return reply(
            StatusCode::BAD_REQUEST,
            json!({"old_password": ["Wrong password."]}),
        );
    }

    state.passwords.insert(email, new);
    StatusCode::NO_CONTENT.into_response()
}

async fn get_me(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let state = state.lock().unwrap();
    match authorize(&state, &headers) {
        Some(email) => reply(StatusCode::OK, state.profiles[&email].clone()),
        None => unauthorized(),
    }
}

async fn patch_me(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    let Some(email) = authorize(&state, &headers) else {
        return unauthorized();
    };

    let profile = state
        .profiles
        .get_mut(&email)
        .expect("profile exists for authorized user");
    merge(profile, &body);
    reply(StatusCode::OK, profile.clone())
}

async fn categories(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let state = state.lock().unwrap();
    if authorize(&state, &headers).is_none() {
        return unauthorized();
    }
    reply(
        StatusCode::OK,
        json!([
            {"id": 1, "name": "PROTEIN_PRODUCTS"},
            {"id": 2, "name": "GARNISH"},
            {"id": 3, "name": "VEGETABLES"},
        ]),
    )
}

async fn tags(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let state = state.lock().unwrap();
    if authorize(&state, &headers).is_none() {
        return unauthorized();
    }
    reply(
        StatusCode::OK,
        json!([{"id": 1, "name": "Мясо"}, {"id": 2, "name": "Гарнир"}]),
    )
}

async fn antitags(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let state = state.lock().unwrap();
    if authorize(&state, &headers).is_none() {
        return unauthorized();
    }
    reply(
        StatusCode::OK,
        json!([{"id": 1, "name": "Куркума"}, {"id": 2, "name": "Паприка"}]),
    )
}

async fn menu(
    State(state): State<Shared>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Response {
    let mut state = state.lock().unwrap();
    if authorize(&state, &headers).is_none() {
        return unauthorized();
    }
    state.menu_queries.push(query);
    let dishes: Vec<Value> = state.dishes.values().cloned().collect();
    reply(StatusCode::OK, Value::Array(dishes))
}

async fn create_dish(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    if authorize(&state, &headers).is_none() {
        return unauthorized();
    }
    if body["name"].as_str().unwrap_or_default().is_empty() {
        return reply(
            StatusCode::BAD_REQUEST,
            json!({"name": ["This field may not be blank."]}),
        );
    }
    let dish = state.add_dish(body);
    reply(StatusCode::CREATED, dish)
}

async fn get_dish(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    let state = state.lock().unwrap();
    if authorize(&state, &headers).is_none() {
        return unauthorized();
    }
    match state.dishes.get(&id) {
        Some(dish) => reply(StatusCode::OK, dish.clone()),
        None => not_found(),
    }
}

async fn patch_dish(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    if authorize(&state, &headers).is_none() {
        return unauthorized();
    }
    match state.dishes.get_mut(&id) {
        Some(dish) => {
            merge(dish, &body);
            reply(StatusCode::OK, dish.clone())
        }
        None => not_found(),
    }
}

async fn list_plates(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let state = state.lock().unwrap();
    if authorize(&state, &headers).is_none() {
        return unauthorized();
    }
    let plates: Vec<Value> = state.plates.values().cloned().collect();
    reply(StatusCode::OK, Value::Array(plates))
}

async fn create_plate(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    if authorize(&state, &headers).is_none() {
        return unauthorized();
    }

    let mut components = Vec::new();
    for field in ["proteinproduct", "garnishproduct", "vegetableproduct"] {
        let dish = body[field].as_i64().and_then(|id| state.dishes.get(&id));
        match dish {
            Some(dish) => components.push(dish.clone()),
            None => {
                return reply(
                    StatusCode::BAD_REQUEST,
                    json!({field: ["Invalid pk - object does not exist."]}),
                )
            }
        }
    }

    let sum = |key: &str| -> f64 { components.iter().filter_map(|d| d[key].as_f64()).sum() };
    let rating = sum("rating") / components.len() as f64;
    let (calories, price) = (sum("calories"), sum("price"));

    let id = state.next_id();
    let plate = json!({
        "id": id,
        "proteinproduct": body["proteinproduct"],
        "garnishproduct": body["garnishproduct"],
        "vegetableproduct": body["vegetableproduct"],
        "calories": calories,
        "price": price,
        "rating": rating,
    });
    state.plates.insert(id, plate.clone());
    reply(StatusCode::CREATED, plate)
}

async fn get_plate(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    let state = state.lock().unwrap();
    if authorize(&state, &headers).is_none() {
        return unauthorized();
    }
    match state.plates.get(&id) {
        Some(plate) => reply(StatusCode::OK, plate.clone()),
        None => not_found(),
    }
}

async fn plain_text() -> Response {
    (StatusCode::BAD_GATEWAY, "upstream unavailable").into_response()
}

fn echo_headers(headers: &HeaderMap) -> Value {
    let get = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    json!({
        "content_type": get(header::CONTENT_TYPE),
        "authorization": get(header::AUTHORIZATION),
    })
}

async fn echo(headers: HeaderMap, Json(body): Json<Value>) -> Response {
    let mut out = echo_headers(&headers);
    out["body"] = body;
    reply(StatusCode::OK, out)
}

async fn echo_get(headers: HeaderMap) -> Response {
    reply(StatusCode::OK, echo_headers(&headers))
}
