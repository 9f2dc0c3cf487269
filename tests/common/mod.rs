// Common test utilities and helper structs
// Shared across all test files to avoid duplication

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
    Router,
};
use chrono::Utc;
use foodgram_backend_core::{
    app::{build_router, AppState},
    db::{
        DbError, IngredientRepository, InsertOutcome, MembershipRepository, Repository,
        ShoppingCartRepository, ShortLinkRepository,
    },
    models::{
        AccessTokenClaims, CartIngredient, Ingredient, NewShortLink, RecipeList, RecipeSummary,
        ShortLink,
    },
    services::{CodeSource, JwtService, RecipeUrlBuilder, ShortCodeGenerator},
};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use std::collections::{BTreeMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};
use tower::util::ServiceExt;
use uuid::Uuid;

pub const TEST_JWT_SECRET: &str = "integration-test-secret-at-least-32-chars";
pub const TEST_AUDIENCE: &str = "foodgram";
pub const TEST_ISSUER: &str = "foodgram-auth";
pub const TEST_BASE_URL: &str = "https://foodgram.example";

// =============================================================================
// IN-MEMORY STORE
// =============================================================================

#[derive(Default)]
struct StoreState {
    recipes: BTreeMap<i64, RecipeSummary>,
    /// recipe_id -> [(name, unit, amount)]
    recipe_ingredients: BTreeMap<i64, Vec<(String, String, i32)>>,
    ingredients: Vec<Ingredient>,
    shopping_cart: HashSet<(Uuid, i64)>,
    favorites: HashSet<(Uuid, i64)>,
    short_links: Vec<ShortLink>,
    next_link_id: i64,
    /// Codes reported as taken on insert without being visible to `code_exists`
    hidden_codes: HashSet<String>,
    /// Link inserted by a "concurrent request" right before the next insert
    racing_link: Option<NewShortLink>,
    code_checks: usize,
}

/// Repository backed by plain collections behind a mutex
#[derive(Default, Clone)]
pub struct InMemoryRepository {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_recipe(&self, id: i64, name: &str, ingredients: &[(&str, &str, i32)]) {
        let mut state = self.state.lock().unwrap();
        state.recipes.insert(
            id,
            RecipeSummary {
                id,
                name: name.to_string(),
                cooking_time: 30,
            },
        );
        state.recipe_ingredients.insert(
            id,
            ingredients
                .iter()
                .map(|(n, u, a)| (n.to_string(), u.to_string(), *a))
                .collect(),
        );
        for (n, u, _) in ingredients {
            if !state
                .ingredients
                .iter()
                .any(|i| i.name == *n && i.measurement_unit == *u)
            {
                let id = state.ingredients.len() as i64 + 1;
                state.ingredients.push(Ingredient {
                    id,
                    name: n.to_string(),
                    measurement_unit: u.to_string(),
                });
            }
        }
    }

    pub fn add_to_cart(&self, user_id: Uuid, recipe_id: i64) {
        self.state
            .lock()
            .unwrap()
            .shopping_cart
            .insert((user_id, recipe_id));
    }

    pub fn is_in_cart(&self, user_id: Uuid, recipe_id: i64) -> bool {
        self.state
            .lock()
            .unwrap()
            .shopping_cart
            .contains(&(user_id, recipe_id))
    }

    /// Store a link for some recipe so its code is taken
    pub fn seed_link(&self, recipe_id: i64, code: &str) -> ShortLink {
        let mut state = self.state.lock().unwrap();
        Self::store_link(
            &mut state,
            NewShortLink {
                recipe_id,
                full_url: format!("{}/recipes/{}/", TEST_BASE_URL, recipe_id),
                short_code: code.to_string(),
                short_url: format!("/s/{}", code),
            },
        )
    }

    /// Make `code` collide on insert while `code_exists` still reports it free
    pub fn hide_code(&self, code: &str) {
        self.state
            .lock()
            .unwrap()
            .hidden_codes
            .insert(code.to_string());
    }

    /// Simulate another request creating the recipe's link first
    pub fn race_next_insert(&self, recipe_id: i64, code: &str) {
        self.state.lock().unwrap().racing_link = Some(NewShortLink {
            recipe_id,
            full_url: format!("{}/recipes/{}/", TEST_BASE_URL, recipe_id),
            short_code: code.to_string(),
            short_url: format!("/s/{}", code),
        });
    }

    pub fn link_count(&self) -> usize {
        self.state.lock().unwrap().short_links.len()
    }

    pub fn code_checks(&self) -> usize {
        self.state.lock().unwrap().code_checks
    }

    fn store_link(state: &mut StoreState, link: NewShortLink) -> ShortLink {
        state.next_link_id += 1;
        let stored = ShortLink {
            id: state.next_link_id,
            recipe_id: link.recipe_id,
            full_url: link.full_url,
            short_code: link.short_code,
            short_url: link.short_url,
            created_at: Utc::now(),
        };
        state.short_links.push(stored.clone());
        stored
    }
}

#[async_trait]
impl ShortLinkRepository for InMemoryRepository {
    async fn recipe_exists(&self, recipe_id: i64) -> Result<bool, DbError> {
        Ok(self.state.lock().unwrap().recipes.contains_key(&recipe_id))
    }

    async fn code_exists(&self, code: &str) -> Result<bool, DbError> {
        let mut state = self.state.lock().unwrap();
        state.code_checks += 1;
        Ok(state.short_links.iter().any(|l| l.short_code == code))
    }

    async fn find_by_recipe(&self, recipe_id: i64) -> Result<Option<ShortLink>, DbError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .short_links
            .iter()
            .find(|l| l.recipe_id == recipe_id)
            .cloned())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, DbError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .short_links
            .iter()
            .find(|l| l.short_code == code)
            .cloned())
    }

    async fn insert_or_fetch(&self, link: NewShortLink) -> Result<InsertOutcome, DbError> {
        let mut state = self.state.lock().unwrap();

        if let Some(racing) = state.racing_link.take() {
            Self::store_link(&mut state, racing);
        }

        if let Some(existing) = state
            .short_links
            .iter()
            .find(|l| l.recipe_id == link.recipe_id)
        {
            return Ok(InsertOutcome::Existing(existing.clone()));
        }

        if state.hidden_codes.remove(&link.short_code)
            || state
                .short_links
                .iter()
                .any(|l| l.short_code == link.short_code)
        {
            return Ok(InsertOutcome::CodeTaken);
        }

        Ok(InsertOutcome::Inserted(Self::store_link(&mut state, link)))
    }
}

#[async_trait]
impl ShoppingCartRepository for InMemoryRepository {
    async fn cart_ingredients(&self, user_id: Uuid) -> Result<Vec<CartIngredient>, DbError> {
        let state = self.state.lock().unwrap();
        let rows = state
            .shopping_cart
            .iter()
            .filter(|(user, _)| *user == user_id)
            .flat_map(|(_, recipe_id)| {
                state
                    .recipe_ingredients
                    .get(recipe_id)
                    .cloned()
                    .unwrap_or_default()
            })
            .map(|(name, unit, amount)| CartIngredient::new(name, unit, amount))
            .collect();
        Ok(rows)
    }
}

#[async_trait]
impl MembershipRepository for InMemoryRepository {
    async fn recipe_summary(&self, recipe_id: i64) -> Result<Option<RecipeSummary>, DbError> {
        Ok(self.state.lock().unwrap().recipes.get(&recipe_id).cloned())
    }

    async fn add_member(
        &self,
        list: RecipeList,
        user_id: Uuid,
        recipe_id: i64,
    ) -> Result<bool, DbError> {
        let mut state = self.state.lock().unwrap();
        let set = match list {
            RecipeList::ShoppingCart => &mut state.shopping_cart,
            RecipeList::Favorites => &mut state.favorites,
        };
        Ok(set.insert((user_id, recipe_id)))
    }

    async fn remove_member(
        &self,
        list: RecipeList,
        user_id: Uuid,
        recipe_id: i64,
    ) -> Result<bool, DbError> {
        let mut state = self.state.lock().unwrap();
        let set = match list {
            RecipeList::ShoppingCart => &mut state.shopping_cart,
            RecipeList::Favorites => &mut state.favorites,
        };
        Ok(set.remove(&(user_id, recipe_id)))
    }
}

#[async_trait]
impl IngredientRepository for InMemoryRepository {
    async fn search_ingredients(
        &self,
        name_prefix: Option<&str>,
    ) -> Result<Vec<Ingredient>, DbError> {
        let prefix = name_prefix.map(str::to_lowercase);
        let mut found: Vec<Ingredient> = self
            .state
            .lock()
            .unwrap()
            .ingredients
            .iter()
            .filter(|i| match &prefix {
                Some(p) => i.name.to_lowercase().starts_with(p.as_str()),
                None => true,
            })
            .cloned()
            .collect();
        found.sort_by(|a, b| {
            (&a.name, &a.measurement_unit).cmp(&(&b.name, &b.measurement_unit))
        });
        Ok(found)
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn ping(&self) -> Result<(), DbError> {
        Ok(())
    }
}

// =============================================================================
// SCRIPTED CODE SOURCE
// =============================================================================

/// Yields pre-scripted codes in order, then repeats the last one
pub struct ScriptedCodeSource {
    codes: Mutex<VecDeque<String>>,
    last: Mutex<String>,
    draws: Mutex<usize>,
}

impl ScriptedCodeSource {
    pub fn new(codes: &[&str]) -> Self {
        Self {
            codes: Mutex::new(codes.iter().map(|c| c.to_string()).collect()),
            last: Mutex::new(codes.last().map(|c| c.to_string()).unwrap_or_default()),
            draws: Mutex::new(0),
        }
    }

    pub fn draws(&self) -> usize {
        *self.draws.lock().unwrap()
    }
}

impl CodeSource for ScriptedCodeSource {
    fn next_code(&self, _length: usize) -> String {
        *self.draws.lock().unwrap() += 1;
        match self.codes.lock().unwrap().pop_front() {
            Some(code) => code,
            None => self.last.lock().unwrap().clone(),
        }
    }
}

// =============================================================================
// APP SETUP
// =============================================================================

pub fn test_jwt_service() -> JwtService {
    JwtService::new(TEST_JWT_SECRET, TEST_AUDIENCE, TEST_ISSUER)
}

pub fn test_state(repo: InMemoryRepository, generator: ShortCodeGenerator) -> AppState {
    AppState::new(
        Arc::new(repo),
        test_jwt_service(),
        generator,
        RecipeUrlBuilder::new(TEST_BASE_URL),
    )
}

pub fn scripted_generator(source: Arc<ScriptedCodeSource>, max_attempts: usize) -> ShortCodeGenerator {
    ShortCodeGenerator::with_source(source, 3, max_attempts).unwrap()
}

/// Sign an access token the way the auth service does
pub fn access_token_for(user_id: Uuid) -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs();
    let claims = AccessTokenClaims::new(
        user_id,
        TEST_AUDIENCE.to_string(),
        TEST_ISSUER.to_string(),
        now,
        now + 3600,
    );
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .unwrap()
}

/// Test application wrapper
pub struct TestApp {
    pub app: Router,
    pub repo: InMemoryRepository,
}

impl TestApp {
    pub fn new(repo: InMemoryRepository) -> Self {
        let generator = ShortCodeGenerator::new(3, 256).unwrap();
        Self::with_generator(repo, generator)
    }

    pub fn with_generator(repo: InMemoryRepository, generator: ShortCodeGenerator) -> Self {
        let state = test_state(repo.clone(), generator);
        let app = build_router(state, &["*".to_string()], false);
        Self { app, repo }
    }

    pub fn get(&self, uri: &str) -> TestRequest {
        TestRequest::new(self, "GET", uri)
    }

    pub fn post(&self, uri: &str) -> TestRequest {
        TestRequest::new(self, "POST", uri)
    }

    pub fn delete(&self, uri: &str) -> TestRequest {
        TestRequest::new(self, "DELETE", uri)
    }
}

/// Test request builder
pub struct TestRequest<'a> {
    app: &'a TestApp,
    method: &'static str,
    uri: String,
    bearer: Option<String>,
}

impl<'a> TestRequest<'a> {
    fn new(app: &'a TestApp, method: &'static str, uri: &str) -> Self {
        Self {
            app,
            method,
            uri: uri.to_string(),
            bearer: None,
        }
    }

    /// Authenticate as the given user
    pub fn as_user(mut self, user_id: Uuid) -> Self {
        self.bearer = Some(access_token_for(user_id));
        self
    }

    pub fn bearer(mut self, token: &str) -> Self {
        self.bearer = Some(token.to_string());
        self
    }

    pub async fn send(self) -> TestResponse {
        let mut builder = Request::builder().method(self.method).uri(&self.uri);
        if let Some(token) = self.bearer {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = builder.body(Body::empty()).unwrap();

        let response = self.app.app.clone().oneshot(request).await.unwrap();

        TestResponse { response }
    }
}

/// Test response wrapper
pub struct TestResponse {
    response: Response<Body>,
}

impl TestResponse {
    pub fn status(&self) -> StatusCode {
        self.response.status()
    }

    pub fn header(&self, name: header::HeaderName) -> Option<String> {
        self.response
            .headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(String::from)
    }

    pub async fn json<T: serde::de::DeserializeOwned>(self) -> T {
        let body = axum::body::to_bytes(self.response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    pub async fn text(self) -> String {
        let body = axum::body::to_bytes(self.response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(body.to_vec()).unwrap()
    }
}
