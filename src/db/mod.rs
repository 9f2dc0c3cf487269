pub mod diesel_pool;
pub mod postgres;
pub mod repository;

pub use diesel_pool::{
    check_diesel_health, create_diesel_pool, mask_connection_string, DieselDatabaseConfig,
    DieselPool,
};
pub use postgres::PgRepository;
pub use repository::{
    DbError, IngredientRepository, InsertOutcome, MembershipRepository, Repository,
    ShoppingCartRepository, ShortLinkRepository,
};
