//! Decorator metadata read from TypeScript class source.
//!
//! Decorators are never executed. `parse_module` reads class declarations
//! with a pest grammar, and the `parse_*` functions turn the decorators on a
//! class into plain metadata records. A class without the relevant decorator
//! (or one missing a required field) yields `None` or an empty list.

pub mod body;
pub mod class_parse;
pub mod component;
pub mod directive;
pub mod input;
pub mod options;
pub mod pipe;

pub use body::{BodyShape, body_shape, strip_this};
pub use class_parse::{ClassDecl, Decorator, Member, MemberKind, find_decorated, parse_module};
pub use component::{
    ComponentMetadata, LayoutMetadata, RouteMetadata, ServiceMetadata, ServiceScope, UnitMetadata,
    parse_component, parse_layout, parse_route, parse_service, parse_unit,
};
pub use directive::{DirectiveMetadata, bare_selector, parse_directive};
pub use input::{InputMetadata, parse_inputs};
pub use options::OptionValue;
pub use pipe::{PipeMetadata, parse_pipe};
