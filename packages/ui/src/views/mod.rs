mod modal_overlay;
pub use modal_overlay::ModalOverlay;

mod coming_soon;
pub use coming_soon::ComingSoon;

mod stat_card;
pub use stat_card::StatCard;

mod creator_card;
pub use creator_card::{CreatorCard, CreatorDetail};

mod overview;
pub use overview::OverviewView;

mod database;
pub use database::DatabaseView;

mod billing;
pub use billing::BillingView;

mod account;
pub use account::AccountView;

mod dashboard;
pub use dashboard::{DashboardSection, DashboardView};
