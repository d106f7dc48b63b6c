// Client state for the AgriDoc app. No I/O lives here: every flow exposes a
// begin/finish pair so the host can run the network call wherever it likes.

pub mod advisor;
pub mod chat;
pub mod dashboard;
pub mod hero;
pub mod locale;
pub mod location;
pub mod media;
pub mod profile;
pub mod scan;
pub mod schemes;
pub mod weather;

pub use hero::{reduce, HeroConfig, HeroEffects, HeroEvent, HeroLayout, HeroState};
pub use locale::Lang;
pub use profile::{Coordinates, UserProfile};
