mod visit;

pub use self::visit::track_visit;
