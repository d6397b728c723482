// SPDX-License-Identifier: MPL-2.0
//! Size specifications and the one-dimensional solver.
//!
//! A widget declares its extent on each axis as a [`Length`]. Containers
//! resolve their children's lengths along the main axis with
//! [`resolve_axis`] and along the cross axis with [`resolve_cross`].
//!
//! The textual form used when composing widgets is `"W,H"`, each side being
//! empty (content driven), `N` (fixed logical pixels), `N%` (percentage of
//! the parent) or `Nf` (flex weight):
//!
//! ```
//! use imeditor::ui::layout::{Length, SizeSpec};
//!
//! let spec: SizeSpec = "30%,".parse().unwrap();
//! assert_eq!(spec.width, Length::Percent(30.0));
//! assert_eq!(spec.height, Length::Unset);
//! ```

use super::geometry::{Alignment, Axis};
use crate::error::{Error, Result};
use crate::ui::scale::ScaleFactor;
use std::fmt;
use std::str::FromStr;

/// Extent of a widget on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Length {
    /// Fixed size in logical pixels.
    Fixed(u32),
    /// Percentage (0 to 100) of the container's full extent.
    Percent(f32),
    /// Share of the space left after fixed, percent and content children.
    Flex(f32),
    /// Content driven.
    #[default]
    Unset,
}

impl Length {
    /// Weight 0 flex behaves as [`Length::Unset`].
    #[must_use]
    pub fn normalized(self) -> Self {
        match self {
            Length::Flex(weight) if weight <= 0.0 || !weight.is_finite() => Length::Unset,
            other => other,
        }
    }

    #[must_use]
    pub fn is_flex(self) -> bool {
        matches!(self.normalized(), Length::Flex(_))
    }

    /// Converts the declaration into a solver track.
    ///
    /// `natural` is the measured content size in physical pixels.
    #[must_use]
    pub fn track(self, scale: ScaleFactor, natural: u32) -> Track {
        match self.normalized() {
            Length::Fixed(px) => Track::Fixed(scale.px(px)),
            Length::Percent(percent) => Track::Percent(percent),
            Length::Flex(weight) => Track::Flex(weight),
            Length::Unset => Track::Content(natural),
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Length::Fixed(px) => write!(f, "{px}"),
            Length::Percent(percent) => write!(f, "{percent}%"),
            Length::Flex(weight) => write!(f, "{weight}f"),
            Length::Unset => Ok(()),
        }
    }
}

/// Independent width and height declarations.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SizeSpec {
    pub width: Length,
    pub height: Length,
}

impl SizeSpec {
    pub const UNSET: SizeSpec = SizeSpec {
        width: Length::Unset,
        height: Length::Unset,
    };

    #[must_use]
    pub fn new(width: Length, height: Length) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn along(self, axis: Axis) -> Length {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }
}

impl fmt::Display for SizeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.width, self.height)
    }
}

impl FromStr for SizeSpec {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self> {
        let (width, height) = input.split_once(',').ok_or_else(|| Error::SizeSpec {
            input: input.to_string(),
            reason: "expected `width,height`".to_string(),
        })?;
        Ok(Self {
            width: parse_length(input, width)?,
            height: parse_length(input, height)?,
        })
    }
}

fn parse_length(input: &str, part: &str) -> Result<Length> {
    let invalid = |reason: &str| Error::SizeSpec {
        input: input.to_string(),
        reason: reason.to_string(),
    };

    let part = part.trim();
    if part.is_empty() {
        return Ok(Length::Unset);
    }

    if let Some(number) = part.strip_suffix('%') {
        let percent: f32 = number
            .trim()
            .parse()
            .map_err(|_| invalid("percentage is not a number"))?;
        if !(0.0..=100.0).contains(&percent) {
            return Err(invalid("percentage must be between 0 and 100"));
        }
        return Ok(Length::Percent(percent));
    }

    if let Some(number) = part.strip_suffix('f') {
        let weight: f32 = number
            .trim()
            .parse()
            .map_err(|_| invalid("flex weight is not a number"))?;
        if !weight.is_finite() || weight < 0.0 {
            return Err(invalid("flex weight must be non-negative"));
        }
        return Ok(Length::Flex(weight));
    }

    part.parse::<u32>()
        .map(Length::Fixed)
        .map_err(|_| invalid("fixed size must be a whole number of pixels"))
}

// =============================================================================
// Solver
// =============================================================================

/// A child's resolved request along one axis, in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Track {
    Fixed(u32),
    Percent(f32),
    Flex(f32),
    /// Natural (measured) size.
    Content(u32),
}

/// Resolves the main-axis extent of each child of a container.
///
/// Fixed, percent and content tracks are allocated first, in child order,
/// each clamped to what is still available. Percentages refer to the full
/// `available` extent. The remainder is shared between flex tracks by
/// weight: each gets the floor of its exact share, and leftover pixels go
/// to the largest fractional parts, ties to the earlier child.
///
/// The returned extents never sum to more than `available`.
#[must_use]
pub fn resolve_axis(available: u32, tracks: &[Track]) -> Vec<u32> {
    let mut sizes = vec![0u32; tracks.len()];
    let mut remaining = available;
    let mut flex = Vec::new();

    for (i, track) in tracks.iter().enumerate() {
        let wanted = match *track {
            Track::Fixed(px) | Track::Content(px) => px,
            Track::Percent(percent) => percent_of(available, percent),
            Track::Flex(weight) => {
                if weight > 0.0 && weight.is_finite() {
                    flex.push((i, f64::from(weight)));
                }
                continue;
            }
        };
        let size = wanted.min(remaining);
        sizes[i] = size;
        remaining -= size;
    }

    if remaining == 0 || flex.is_empty() {
        return sizes;
    }

    let total_weight: f64 = flex.iter().map(|(_, weight)| weight).sum();
    let space = f64::from(remaining);

    let mut distributed = 0u32;
    let mut fractions = Vec::with_capacity(flex.len());
    for &(i, weight) in &flex {
        let exact = space * weight / total_weight;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let floor = (exact.floor() as u32).min(remaining - distributed);
        sizes[i] = floor;
        distributed += floor;
        fractions.push((i, exact - f64::from(floor)));
    }

    // Stable sort keeps child order among equal remainders.
    fractions.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    let leftover = (remaining - distributed) as usize;
    for &(i, _) in fractions.iter().take(leftover) {
        sizes[i] += 1;
    }

    sizes
}

/// Resolves a child's extent on the cross axis of its container.
///
/// Flex stretches to the full extent, percent is relative to it, fixed and
/// content sizes are clamped to it.
#[must_use]
pub fn resolve_cross(available: u32, track: Track) -> u32 {
    match track {
        Track::Fixed(px) | Track::Content(px) => px.min(available),
        Track::Percent(percent) => percent_of(available, percent).min(available),
        Track::Flex(weight) if weight > 0.0 && weight.is_finite() => available,
        Track::Flex(_) => 0,
    }
}

/// Offset of a child of `extent` inside `available` on the cross axis.
#[must_use]
pub fn align_offset(available: u32, extent: u32, alignment: Alignment) -> u32 {
    let leftover = available.saturating_sub(extent);
    match alignment {
        Alignment::Start => 0,
        Alignment::Center => leftover / 2,
        Alignment::End => leftover,
    }
}

fn percent_of(available: u32, percent: f32) -> u32 {
    let percent = if percent.is_finite() {
        f64::from(percent).clamp(0.0, 100.0)
    } else {
        0.0
    };
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let size = (f64::from(available) * percent / 100.0).round() as u32;
    size
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_length_form() {
        let spec: SizeSpec = "10,0".parse().expect("fixed");
        assert_eq!(spec, SizeSpec::new(Length::Fixed(10), Length::Fixed(0)));

        let spec: SizeSpec = "30%,".parse().expect("percent");
        assert_eq!(spec, SizeSpec::new(Length::Percent(30.0), Length::Unset));

        let spec: SizeSpec = " 1f , 2.5f ".parse().expect("flex");
        assert_eq!(spec, SizeSpec::new(Length::Flex(1.0), Length::Flex(2.5)));

        let spec: SizeSpec = ",".parse().expect("unset");
        assert_eq!(spec, SizeSpec::UNSET);
    }

    #[test]
    fn rejects_malformed_specs() {
        for input in ["", "10", "abc,", "-1f,", "120%,", "1.5,", "x%,"] {
            let err = input.parse::<SizeSpec>().expect_err(input);
            assert!(matches!(err, Error::SizeSpec { .. }), "{input}: {err:?}");
        }
    }

    #[test]
    fn display_matches_parse_input() {
        let spec: SizeSpec = "30%,1f".parse().expect("valid");
        assert_eq!(spec.to_string(), "30%,1f");
    }

    #[test]
    fn zero_weight_flex_is_unset() {
        assert_eq!(Length::Flex(0.0).normalized(), Length::Unset);
        assert_eq!(
            Length::Flex(0.0).track(ScaleFactor::default(), 7),
            Track::Content(7)
        );
    }

    #[test]
    fn fixed_lengths_are_scaled() {
        assert_eq!(
            Length::Fixed(10).track(ScaleFactor::new(2.0), 0),
            Track::Fixed(20)
        );
    }

    #[test]
    fn two_equal_flex_children_split_evenly() {
        let sizes = resolve_axis(100, &[Track::Flex(1.0), Track::Flex(1.0)]);
        assert_eq!(sizes, vec![50, 50]);
    }

    #[test]
    fn odd_pixel_goes_to_first_flex_child() {
        let sizes = resolve_axis(101, &[Track::Flex(1.0), Track::Flex(1.0)]);
        assert_eq!(sizes, vec![51, 50]);

        let sizes = resolve_axis(100, &[Track::Flex(1.0), Track::Flex(1.0), Track::Flex(1.0)]);
        assert_eq!(sizes, vec![34, 33, 33]);
    }

    #[test]
    fn flex_shares_follow_weights() {
        let sizes = resolve_axis(90, &[Track::Flex(1.0), Track::Flex(2.0)]);
        assert_eq!(sizes, vec![30, 60]);
    }

    #[test]
    fn flex_gets_what_fixed_and_percent_leave() {
        let sizes = resolve_axis(
            200,
            &[
                Track::Fixed(10),
                Track::Flex(1.0),
                Track::Content(20),
                Track::Percent(30.0),
            ],
        );
        assert_eq!(sizes, vec![10, 110, 20, 60]);
    }

    #[test]
    fn percent_refers_to_full_extent() {
        let sizes = resolve_axis(100, &[Track::Fixed(40), Track::Percent(50.0)]);
        assert_eq!(sizes, vec![40, 50]);
    }

    #[test]
    fn overflow_clamps_in_child_order_and_starves_flex() {
        let sizes = resolve_axis(
            50,
            &[Track::Fixed(40), Track::Flex(1.0), Track::Percent(50.0)],
        );
        assert_eq!(sizes, vec![40, 0, 10]);
        assert!(sizes.iter().sum::<u32>() <= 50);
    }

    #[test]
    fn empty_track_list_resolves_to_nothing() {
        assert!(resolve_axis(100, &[]).is_empty());
    }

    #[test]
    fn cross_axis_rules() {
        assert_eq!(resolve_cross(80, Track::Flex(1.0)), 80);
        assert_eq!(resolve_cross(80, Track::Percent(25.0)), 20);
        assert_eq!(resolve_cross(80, Track::Content(100)), 80);
        assert_eq!(resolve_cross(80, Track::Fixed(30)), 30);
    }

    #[test]
    fn alignment_offsets() {
        assert_eq!(align_offset(100, 30, Alignment::Start), 0);
        assert_eq!(align_offset(100, 30, Alignment::Center), 35);
        assert_eq!(align_offset(100, 30, Alignment::End), 70);
        assert_eq!(align_offset(10, 30, Alignment::End), 0);
    }
}
