#![forbid(unsafe_code)]

//! Tile positions whose coordinates are token strings.
//!
//! A [`TokenPosition`] couples an X and a Y field under one
//! [`AggregateContextual`], so readiness, mutability, update propagation,
//! token enumeration and diagnostics all come from the aggregate. On top of
//! that it converts the two resolved texts into a [`Location`].
//!
//! # Invariants
//!
//! 1. Both fields are always present; X is member 0 and Y member 1.
//! 2. `is_ready` / `is_mutable` are derived from the fields on every call.
//! 3. No location is cached. [`try_get_location`](TokenPosition::try_get_location)
//!    re-parses the current resolved text every time.
//! 4. Conversion checks X before Y and reports only the first failure.
//!
//! # Example
//!
//! ```
//! use tokpos::{Contextual, Location, TokenContext, TokenPosition};
//!
//! let mut position = TokenPosition::parse(Some("{{TileX}}"), Some("10")).unwrap();
//! assert!(!position.is_ready());
//!
//! let mut ctx = TokenContext::new();
//! ctx.set("TileX", "5");
//! assert!(position.update_context(&ctx));
//! assert_eq!(position.try_get_location(), Ok(Location::new(5, 10)));
//! ```

use std::fmt;

use tokpos_core::{
    AggregateContextual, Context, Contextual, ContextualState, ContextualText, Location,
};
use tokpos_text::TokenString;

use crate::error::{Axis, ConstructionError, LocationError, PositionError};

/// Whether a position can currently produce a location candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PositionPhase {
    /// Both fields are ready.
    Ready,
    /// At least one field is not ready.
    NotReady,
}

/// A tile position whose X and Y come from contextual text fields.
#[derive(Clone)]
pub struct TokenPosition<F = TokenString> {
    contextuals: AggregateContextual<(F, F)>,
}

impl<F: ContextualText> TokenPosition<F> {
    /// Couple two fields. No context evaluation happens here.
    #[must_use]
    pub fn new(x: F, y: F) -> Self {
        Self {
            contextuals: AggregateContextual::with_members((x, y)),
        }
    }

    /// Couple two optional fields, failing if either is absent (X checked
    /// first).
    pub fn try_new(x: Option<F>, y: Option<F>) -> Result<Self, ConstructionError> {
        let x = x.ok_or(ConstructionError::missing(Axis::X))?;
        let y = y.ok_or(ConstructionError::missing(Axis::Y))?;
        Ok(Self::new(x, y))
    }

    /// The X coordinate field.
    #[must_use]
    pub fn x(&self) -> &F {
        &self.contextuals.members().0
    }

    /// The Y coordinate field.
    #[must_use]
    pub fn y(&self) -> &F {
        &self.contextuals.members().1
    }

    #[must_use]
    pub fn phase(&self) -> PositionPhase {
        if self.is_ready() {
            PositionPhase::Ready
        } else {
            PositionPhase::NotReady
        }
    }

    /// Convert the current resolved text of both fields into a location.
    pub fn try_get_location(&self) -> Result<Location, LocationError> {
        let x = parse_axis(Axis::X, self.x())?;
        let y = parse_axis(Axis::Y, self.y())?;
        Ok(Location::new(x, y))
    }

    /// Like [`try_get_location`](Self::try_get_location), but yields
    /// [`Location::ORIGIN`] alongside the error on failure.
    #[must_use]
    pub fn location_or_origin(&self) -> (Location, Option<LocationError>) {
        match self.try_get_location() {
            Ok(location) => (location, None),
            Err(err) => (Location::ORIGIN, Some(err)),
        }
    }
}

impl TokenPosition<TokenString> {
    /// Build a position from raw source text such as `"{{TileX}}"`.
    pub fn parse(x: Option<&str>, y: Option<&str>) -> Result<Self, PositionError> {
        let x = x.ok_or(ConstructionError::missing(Axis::X))?;
        let y = y.ok_or(ConstructionError::missing(Axis::Y))?;
        Ok(Self::new(parse_field(Axis::X, x)?, parse_field(Axis::Y, y)?))
    }
}

fn parse_field(axis: Axis, raw: &str) -> Result<TokenString, PositionError> {
    TokenString::parse(raw).map_err(|source| PositionError::Syntax {
        param: axis.param(),
        source,
    })
}

/// Whitespace accepted around an integer: tab through carriage return, and
/// space.
fn is_integer_padding(c: char) -> bool {
    matches!(c, '\t'..='\r' | ' ')
}

fn parse_axis<F: ContextualText>(axis: Axis, field: &F) -> Result<i32, LocationError> {
    if !field.is_ready() {
        return Err(LocationError::NotReady { axis });
    }
    let text = field.resolved_text();
    text.trim_matches(is_integer_padding)
        .parse::<i32>()
        .map_err(|_| LocationError::NotInteger {
            axis,
            value: text.to_string(),
        })
}

impl<F: ContextualText> Contextual for TokenPosition<F> {
    fn is_mutable(&self) -> bool {
        self.contextuals.is_mutable()
    }

    fn is_ready(&self) -> bool {
        self.contextuals.is_ready()
    }

    fn update_context(&mut self, context: &dyn Context) -> bool {
        let changed = self.contextuals.update_context(context);
        tracing::debug!(
            message = "token_position.update",
            changed,
            ready = self.contextuals.is_ready()
        );
        changed
    }

    fn tokens_used(&self) -> Vec<String> {
        self.contextuals.tokens_used()
    }

    fn diagnostic_state(&self) -> ContextualState {
        self.contextuals.diagnostic_state()
    }
}

impl<F: ContextualText> fmt::Debug for TokenPosition<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPosition")
            .field("x", &self.x().resolved_text())
            .field("y", &self.y().resolved_text())
            .field("ready", &self.is_ready())
            .field("mutable", &self.is_mutable())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tokpos_core::TokenContext;
    use tracing_test::traced_test;

    fn position(x: &str, y: &str) -> TokenPosition {
        TokenPosition::parse(Some(x), Some(y)).unwrap()
    }

    fn ctx(pairs: &[(&str, &str)]) -> TokenContext {
        let mut ctx = TokenContext::new();
        for (name, value) in pairs {
            ctx.set(name, *value);
        }
        ctx
    }

    #[test]
    fn literal_fields_convert_without_update() {
        let p = position("5", "10");
        assert!(!p.is_mutable());
        assert!(p.is_ready());
        assert_eq!(p.phase(), PositionPhase::Ready);
        assert_eq!(p.try_get_location(), Ok(Location::new(5, 10)));
    }

    #[test]
    fn x_not_ready_is_reported_first() {
        let p = position("{{TileX}}", "{{TileY}}");
        let err = p.try_get_location().unwrap_err();
        assert_eq!(err, LocationError::NotReady { axis: Axis::X });
        assert_eq!(err.to_string(), "X is not ready");
    }

    #[test]
    fn y_failure_reported_once_x_passes() {
        let p = position("3", "{{TileY}}");
        let err = p.try_get_location().unwrap_err();
        assert_eq!(err.axis(), Axis::Y);
        assert_eq!(err.to_string(), "Y is not ready");
    }

    #[test]
    fn non_integer_text_echoes_value() {
        let p = position("abc", "1");
        assert_eq!(
            p.try_get_location().unwrap_err().to_string(),
            "X value 'abc' can't be parsed as an integer"
        );
    }

    #[test]
    fn integer_parsing_rules() {
        assert_eq!(
            position(" +7 ", "-3").try_get_location(),
            Ok(Location::new(7, -3))
        );
        assert_eq!(
            position("\t4\n", "0").try_get_location(),
            Ok(Location::new(4, 0))
        );
        assert!(position("1.5", "0").try_get_location().is_err());
        assert!(position("1,000", "0").try_get_location().is_err());
        assert!(position("2147483648", "0").try_get_location().is_err());
        assert!(position("", "0").try_get_location().is_err());
        assert_eq!(
            position("-2147483648", "2147483647").try_get_location(),
            Ok(Location::new(i32::MIN, i32::MAX))
        );
    }

    #[test]
    fn parse_error_keeps_untrimmed_text() {
        let err = position(" x ", "0").try_get_location().unwrap_err();
        assert_eq!(
            err,
            LocationError::NotInteger {
                axis: Axis::X,
                value: " x ".to_string()
            }
        );
    }

    #[test]
    fn update_then_convert() {
        let mut p = position("{{TileX}}", "1{{Row}}");
        assert!(p.is_mutable());
        assert_eq!(p.phase(), PositionPhase::NotReady);

        assert!(p.update_context(&ctx(&[("TileX", "5"), ("Row", "0")])));
        assert_eq!(p.try_get_location(), Ok(Location::new(5, 10)));

        assert!(!p.update_context(&ctx(&[("TileX", "5"), ("Row", "0")])));
        assert!(p.update_context(&ctx(&[("TileX", "6"), ("Row", "0")])));
        assert_eq!(p.try_get_location(), Ok(Location::new(6, 10)));
    }

    #[test]
    fn location_or_origin_pairs_sentinel_with_error() {
        let p = position("{{TileX}}", "2");
        let (location, err) = p.location_or_origin();
        assert_eq!(location, Location::ORIGIN);
        assert_eq!(err, Some(LocationError::NotReady { axis: Axis::X }));

        let (location, err) = position("1", "2").location_or_origin();
        assert_eq!(location, Location::new(1, 2));
        assert!(err.is_none());
    }

    #[test]
    fn try_new_names_missing_param() {
        let err = TokenPosition::try_new(None, Some(TokenString::literal("1"))).unwrap_err();
        assert_eq!(err, ConstructionError::InvalidArgument { param: "x" });

        let err = TokenPosition::try_new(Some(TokenString::literal("1")), None).unwrap_err();
        assert_eq!(err.param(), "y");

        let err = TokenPosition::<TokenString>::try_new(None, None).unwrap_err();
        assert_eq!(err.param(), "x");
    }

    #[test]
    fn parse_reports_missing_and_syntax_errors() {
        assert_eq!(
            TokenPosition::parse(Some("1"), None).unwrap_err(),
            PositionError::Construction(ConstructionError::InvalidArgument { param: "y" })
        );
        let err = TokenPosition::parse(Some("1"), Some("{{Y")).unwrap_err();
        assert!(matches!(err, PositionError::Syntax { param: "y", .. }));
        assert!(err.to_string().contains("unterminated"));
    }

    #[test]
    fn tokens_and_diagnostics_pass_through() {
        let mut p = position("{{A}}{{B}}", "{{a}}{{C}}");
        assert_eq!(p.tokens_used(), vec!["A", "B", "a", "C"]);

        let mut context = TokenContext::new();
        context.set("A", "1").set_not_ready("B");
        p.update_context(&context);
        let state = p.diagnostic_state();
        assert!(state.unready_tokens.contains("B"));
        assert!(state.invalid_tokens.contains("C"));
    }

    #[test]
    fn debug_shows_resolved_text() {
        let dbg = format!("{:?}", position("5", "6"));
        assert!(dbg.contains("TokenPosition"));
        assert!(dbg.contains("\"5\""));
    }

    #[test]
    #[traced_test]
    fn update_emits_debug_event() {
        let mut p = position("{{A}}", "1");
        p.update_context(&ctx(&[("A", "1")]));
        assert!(logs_contain("token_position.update"));
    }
}
