//! Map projection engine for gridded model data.
//!
//! Forward and inverse transforms between longitude/latitude (degrees) and
//! projected x/y (meters) for Lambert Conformal Conic, Mercator and
//! Stereographic, on a sphere or an ellipsoid. Every family implements the
//! [`Projector`] trait, so grid code holds a `Box<dyn Projector>` and never
//! names a concrete type.

pub mod batch;
pub mod ellipsoid;
pub mod error;
pub mod geodesy;
pub mod header;
pub mod lambert;
pub mod mercator;
pub mod projector;
pub mod stereographic;

pub use batch::{
    cell_centers, par_project_points, par_unproject_points, project_points, unproject_points,
    CellLattice,
};
pub use ellipsoid::Ellipsoid;
pub use error::{ProjectionError, ProjectionResult};
pub use header::{read_header, ProjectionHeader};
pub use lambert::LambertConformal;
pub use mercator::Mercator;
pub use projector::{
    build_projector, ProjectionKind, ProjectionParameters, Projector, EQUALITY_TOLERANCE,
};
pub use stereographic::{Stereographic, StereographicSubtype};
