//! Lasso - interactive boundary selection for images.
//!
//! A user clicks points on an image; a [`SelectionModel`] joins them into a
//! closed boundary using a [`SelectionStrategy`]:
//!
//! - **Point-to-point**: straight lines between clicks
//! - **Intelligent scissors**: shortest paths that snap to image edges,
//!   computed on a background thread
//!
//! The model keeps an undo history, previews the next segment as a live wire,
//! lets points of a closed boundary be dragged, and exports the enclosed
//! region as a PNG with transparent surroundings.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use image::{Rgba, RgbaImage};
//! use lasso::{CostModel, ModelOptions, Point, SelectionModel, SelectionState};
//!
//! let image = Arc::new(RgbaImage::from_pixel(32, 32, Rgba([90, 90, 90, 255])));
//! let mut model = SelectionModel::scissors(CostModel::CrossGradMono, ModelOptions::default());
//! model.set_image(Some(image)).unwrap();
//!
//! model.add_point(Point::new(4, 4)).unwrap();
//! model.add_point(Point::new(20, 4)).unwrap();
//! assert_eq!(model.state(), SelectionState::Processing);
//!
//! model.wait_for_processing().unwrap();
//! assert_eq!(model.state(), SelectionState::Selecting);
//! assert_eq!(model.selection().len(), 1);
//! ```

mod error;
pub mod events;
pub mod export;
pub mod geometry;
pub mod history;
pub mod model;
pub mod options;
mod point_to_point;
mod scissors;
mod state;
pub mod strategy;

pub use error::{Result, SelectionError};
pub use events::{PropertyChange, PropertyChangeSupport, PropertyConnection, PropertyName};
pub use geometry::{Point, PolyLine};
pub use model::SelectionModel;
pub use options::{ModelOptions, SearchOptions};
pub use point_to_point::PointToPoint;
pub use scissors::Scissors;
pub use state::SelectionState;
pub use strategy::{Extension, SearchTask, SelectionStrategy};

pub use lasso_core::process_queued;
pub use lasso_graph::{CostModel, SearchError};
