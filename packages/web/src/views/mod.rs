mod landing;
pub use landing::{Home, Landing};

mod pricing;
pub use pricing::Pricing;

mod login;
pub use login::Login;

mod signup;
pub use signup::Signup;

mod dashboard;
pub use dashboard::Dashboard;
