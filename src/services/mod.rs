// Services module for the recipe backend
// Business logic layer between the HTTP handlers and the repositories

pub mod jwt;
pub mod membership;
pub mod shopping_list;
pub mod short_code;
pub mod short_link;

pub use jwt::{JwtError, JwtService};
pub use membership::MembershipService;
pub use shopping_list::{
    aggregate, ShoppingListAggregator, ShoppingListItem, ShoppingListReport,
    SHOPPING_LIST_FILENAME, SHOPPING_LIST_HEADER,
};
pub use short_code::{CodeSource, RandomCodeSource, ShortCodeError, ShortCodeGenerator};
pub use short_link::{RecipeUrlBuilder, ShortLinkService};
