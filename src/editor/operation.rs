// SPDX-License-Identifier: MPL-2.0
//! Exclusive lock over the edit in progress.
//!
//! The lock lives in the [`SharedContext`] as the pair
//! `(allow_image_changes, current_operation)`, and every transition below
//! writes both keys together so `allow_image_changes == false` exactly when
//! an operation is recorded. The machine only decides; the editor performs
//! the side effects each [`Transition`] asks for.
//!
//! ```text
//!            crop action                  crop action
//!   Idle ────────────────▶ CropActive ────────────────▶ Idle
//!
//!            slider > 0                   slider = 0
//!   Idle ────────────────▶ FilterPreview ──────────────▶ Idle
//!                           │    ▲
//!                           └────┘ slider > 0
//! ```

use crate::application::port::{FilterKind, FilterStrength};
use crate::error::Result;
use crate::ui::context::{
    AllowImageChanges, CropNotificationShown, CurrentOperation, FilterNotificationShown,
    OperationKind, SharedContext,
};

/// The edit currently holding the lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OperationState {
    #[default]
    Idle,
    CropActive,
    FilterPreview(FilterKind),
}

impl OperationState {
    /// Operation recorded in the shared context for this state.
    #[must_use]
    pub fn operation(self) -> Option<OperationKind> {
        match self {
            OperationState::Idle => None,
            OperationState::CropActive => Some(OperationKind::Crop),
            OperationState::FilterPreview(kind) => Some(OperationKind::Filter(kind)),
        }
    }

    fn from_operation(operation: Option<OperationKind>) -> Self {
        match operation {
            None => OperationState::Idle,
            Some(OperationKind::Crop) => OperationState::CropActive,
            Some(OperationKind::Filter(kind)) => OperationState::FilterPreview(kind),
        }
    }
}

/// A refused attempt to start an operation while another one holds the lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rejection {
    /// Operation holding the lock.
    pub holder: OperationKind,
    /// Whether the user should be told. False once the notice was shown
    /// and until it is reset.
    pub notify: bool,
}

/// What the editor has to do after a crop action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropTransition {
    /// Show the overlay. `guidance` asks for the one-time hint.
    Begin { guidance: bool },
    /// Read the overlay, hide it and crop. The lock is already released.
    Finish,
    Rejected(Rejection),
}

/// What the editor has to do after a filter slider moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterTransition {
    /// Snapshot the image and preview the filter on it.
    Begin,
    /// Re-run the preview from the snapshot.
    Update,
    /// Restore the snapshot. The lock is already released.
    End,
    /// Slider at zero with no preview running.
    Unchanged,
    /// Force the slider back to zero.
    Rejected(Rejection),
}

/// What the editor has to do after a filter's apply button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyTransition {
    /// Keep the filtered image. The lock is already released.
    Commit,
    /// The slider is at zero.
    NothingToApply,
    Rejected(Rejection),
}

/// Transition rules. Holds no state of its own; everything is read from
/// and written to the [`SharedContext`].
#[derive(Debug, Default, Clone, Copy)]
pub struct OperationStateMachine;

impl OperationStateMachine {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Current state, read from the context.
    pub fn state(&self, ctx: &SharedContext) -> Result<OperationState> {
        Ok(OperationState::from_operation(ctx.get::<CurrentOperation>()?))
    }

    /// Crop button pressed.
    pub fn on_crop_action(&self, ctx: &mut SharedContext) -> Result<CropTransition> {
        let transition = match self.state(ctx)? {
            OperationState::Idle => {
                Self::acquire(ctx, OperationKind::Crop);
                let guidance = !ctx.get::<CropNotificationShown>()?;
                if guidance {
                    ctx.set::<CropNotificationShown>(true);
                }
                CropTransition::Begin { guidance }
            }
            OperationState::CropActive => {
                self.release(ctx);
                CropTransition::Finish
            }
            OperationState::FilterPreview(kind) => {
                CropTransition::Rejected(Self::reject(ctx, OperationKind::Filter(kind))?)
            }
        };
        tracing::debug!(?transition, "crop action");
        Ok(transition)
    }

    /// Slider of `kind` moved to `strength`.
    pub fn on_filter_control(
        &self,
        ctx: &mut SharedContext,
        kind: FilterKind,
        strength: FilterStrength,
    ) -> Result<FilterTransition> {
        let transition = match self.state(ctx)? {
            OperationState::Idle if strength.is_zero() => FilterTransition::Unchanged,
            OperationState::Idle => {
                Self::acquire(ctx, OperationKind::Filter(kind));
                FilterTransition::Begin
            }
            OperationState::FilterPreview(active) if active == kind => {
                if strength.is_zero() {
                    self.release(ctx);
                    FilterTransition::End
                } else {
                    FilterTransition::Update
                }
            }
            state => FilterTransition::Rejected(Self::reject(ctx, Self::holder(state))?),
        };
        tracing::debug!(%kind, strength = strength.value(), ?transition, "filter control");
        Ok(transition)
    }

    /// Apply button of `kind` pressed while its slider reads `strength`.
    pub fn on_filter_apply(
        &self,
        ctx: &mut SharedContext,
        kind: FilterKind,
        strength: FilterStrength,
    ) -> Result<ApplyTransition> {
        let transition = match self.state(ctx)? {
            OperationState::CropActive => {
                ApplyTransition::Rejected(Self::reject(ctx, OperationKind::Crop)?)
            }
            OperationState::FilterPreview(active) if active != kind => {
                ApplyTransition::Rejected(Self::reject(ctx, OperationKind::Filter(active))?)
            }
            _ if strength.is_zero() => ApplyTransition::NothingToApply,
            _ => {
                self.release(ctx);
                ApplyTransition::Commit
            }
        };
        tracing::debug!(%kind, ?transition, "filter apply");
        Ok(transition)
    }

    /// Returns to `Idle` unconditionally.
    pub fn release(&self, ctx: &mut SharedContext) {
        ctx.set::<AllowImageChanges>(true);
        ctx.set::<CurrentOperation>(None);
    }

    /// Lets the next rejected attempt notify again.
    pub fn reset_conflict_notice(&self, ctx: &mut SharedContext) {
        ctx.set::<FilterNotificationShown>(false);
    }

    fn acquire(ctx: &mut SharedContext, operation: OperationKind) {
        ctx.set::<AllowImageChanges>(false);
        ctx.set::<CurrentOperation>(Some(operation));
    }

    fn reject(ctx: &mut SharedContext, holder: OperationKind) -> Result<Rejection> {
        let notify = !ctx.get::<FilterNotificationShown>()?;
        if notify {
            ctx.set::<FilterNotificationShown>(true);
        }
        Ok(Rejection { holder, notify })
    }

    fn holder(state: OperationState) -> OperationKind {
        state.operation().unwrap_or(OperationKind::Crop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn strength(value: u32) -> FilterStrength {
        FilterStrength::new(value)
    }

    fn assert_lock_consistent(ctx: &SharedContext) {
        let allow = ctx.get::<AllowImageChanges>().unwrap();
        let current = ctx.get::<CurrentOperation>().unwrap();
        assert_eq!(!allow, current.is_some());
    }

    #[test]
    fn starts_idle() {
        let ctx = SharedContext::with_defaults();
        assert_eq!(OperationStateMachine::new().state(&ctx).unwrap(), OperationState::Idle);
    }

    #[test]
    fn missing_defaults_are_reported() {
        let ctx = SharedContext::new();
        let err = OperationStateMachine::new().state(&ctx).unwrap_err();
        assert!(matches!(err, Error::KeyNotFound("current_operation")));
    }

    #[test]
    fn crop_action_toggles_crop_mode() {
        let machine = OperationStateMachine::new();
        let mut ctx = SharedContext::with_defaults();

        let begin = machine.on_crop_action(&mut ctx).unwrap();
        assert_eq!(begin, CropTransition::Begin { guidance: true });
        assert_eq!(machine.state(&ctx).unwrap(), OperationState::CropActive);
        assert_lock_consistent(&ctx);

        assert_eq!(machine.on_crop_action(&mut ctx).unwrap(), CropTransition::Finish);
        assert_eq!(machine.state(&ctx).unwrap(), OperationState::Idle);
        assert_lock_consistent(&ctx);

        // The guidance hint is shown once per process.
        let again = machine.on_crop_action(&mut ctx).unwrap();
        assert_eq!(again, CropTransition::Begin { guidance: false });
    }

    #[test]
    fn filter_preview_lifecycle() {
        let machine = OperationStateMachine::new();
        let mut ctx = SharedContext::with_defaults();
        let blur = FilterKind::Blur;

        assert_eq!(
            machine.on_filter_control(&mut ctx, blur, strength(0)).unwrap(),
            FilterTransition::Unchanged
        );
        assert_eq!(
            machine.on_filter_control(&mut ctx, blur, strength(3)).unwrap(),
            FilterTransition::Begin
        );
        assert_eq!(machine.state(&ctx).unwrap(), OperationState::FilterPreview(blur));
        assert_eq!(
            machine.on_filter_control(&mut ctx, blur, strength(7)).unwrap(),
            FilterTransition::Update
        );
        assert_eq!(
            machine.on_filter_control(&mut ctx, blur, strength(0)).unwrap(),
            FilterTransition::End
        );
        assert_eq!(machine.state(&ctx).unwrap(), OperationState::Idle);
        assert_lock_consistent(&ctx);
    }

    #[test]
    fn conflicting_attempts_keep_state_and_notify_once() {
        let machine = OperationStateMachine::new();
        let mut ctx = SharedContext::with_defaults();
        machine.on_filter_control(&mut ctx, FilterKind::Blur, strength(5)).unwrap();

        let first = machine.on_crop_action(&mut ctx).unwrap();
        let second = machine
            .on_filter_control(&mut ctx, FilterKind::Sharpen, strength(2))
            .unwrap();
        let holder = OperationKind::Filter(FilterKind::Blur);
        assert_eq!(first, CropTransition::Rejected(Rejection { holder, notify: true }));
        assert_eq!(second, FilterTransition::Rejected(Rejection { holder, notify: false }));
        assert!(ctx.get::<FilterNotificationShown>().unwrap());
        assert_eq!(machine.state(&ctx).unwrap(), OperationState::FilterPreview(FilterKind::Blur));
        assert_lock_consistent(&ctx);
    }

    #[test]
    fn reset_reenables_exactly_one_notice() {
        let machine = OperationStateMachine::new();
        let mut ctx = SharedContext::with_defaults();
        machine.on_crop_action(&mut ctx).unwrap();

        let attempt = |ctx: &mut SharedContext| {
            match machine.on_filter_control(ctx, FilterKind::Blur, strength(1)).unwrap() {
                FilterTransition::Rejected(rejection) => rejection.notify,
                other => panic!("expected rejection, got {other:?}"),
            }
        };
        assert!(attempt(&mut ctx));
        assert!(!attempt(&mut ctx));
        machine.reset_conflict_notice(&mut ctx);
        assert!(attempt(&mut ctx));
        assert!(!attempt(&mut ctx));
    }

    #[test]
    fn successful_operations_do_not_reset_the_notice() {
        let machine = OperationStateMachine::new();
        let mut ctx = SharedContext::with_defaults();
        machine.on_crop_action(&mut ctx).unwrap();
        machine.on_filter_control(&mut ctx, FilterKind::Blur, strength(1)).unwrap();
        machine.on_crop_action(&mut ctx).unwrap();

        machine.on_filter_control(&mut ctx, FilterKind::Blur, strength(1)).unwrap();
        assert!(ctx.get::<FilterNotificationShown>().unwrap());
    }

    #[test]
    fn apply_commits_only_the_active_filter() {
        let machine = OperationStateMachine::new();
        let mut ctx = SharedContext::with_defaults();

        assert_eq!(
            machine.on_filter_apply(&mut ctx, FilterKind::Blur, strength(0)).unwrap(),
            ApplyTransition::NothingToApply
        );

        machine.on_filter_control(&mut ctx, FilterKind::Blur, strength(4)).unwrap();
        assert!(matches!(
            machine.on_filter_apply(&mut ctx, FilterKind::Sharpen, strength(0)).unwrap(),
            ApplyTransition::Rejected(_)
        ));
        assert_eq!(
            machine.on_filter_apply(&mut ctx, FilterKind::Blur, strength(4)).unwrap(),
            ApplyTransition::Commit
        );
        assert_eq!(machine.state(&ctx).unwrap(), OperationState::Idle);
        assert_lock_consistent(&ctx);
    }

    #[test]
    fn apply_during_crop_is_rejected() {
        let machine = OperationStateMachine::new();
        let mut ctx = SharedContext::with_defaults();
        machine.on_crop_action(&mut ctx).unwrap();
        let transition = machine
            .on_filter_apply(&mut ctx, FilterKind::Blur, strength(3))
            .unwrap();
        assert_eq!(
            transition,
            ApplyTransition::Rejected(Rejection {
                holder: OperationKind::Crop,
                notify: true
            })
        );
        assert_eq!(machine.state(&ctx).unwrap(), OperationState::CropActive);
    }
}
