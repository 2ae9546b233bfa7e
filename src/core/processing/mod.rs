pub mod background;
pub mod composite;
pub mod crop;
pub mod foreground;
pub mod isolate;
pub mod otsu;
pub mod padding;
pub mod pipeline;
pub mod resize;
