//! Camera system for the orrery.
//!
//! [`ViewTransform`] holds the view pose (center and zoom), the body being
//! followed, and an explicit easing state machine for focus moves. The
//! Bevy camera is a pure projection of that pose, written once per frame
//! after the simulation has advanced.

use bevy::{
    input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll},
    prelude::*,
};
use bevy_egui::EguiContexts;

use crate::simulation::Simulation;
use crate::types::SimulationSet;

/// Minimum zoom level (furthest out).
pub const MIN_ZOOM: f32 = 0.1;

/// Maximum zoom level (closest in).
pub const MAX_ZOOM: f32 = 10.0;

/// Zoom level at startup and after reset.
pub const DEFAULT_ZOOM: f32 = 1.0;

/// Additive zoom change per scroll notch or key press.
pub const ZOOM_STEP: f32 = 0.1;

/// Keyboard pan distance per frame, in screen pixels.
pub const PAN_STEP: f32 = 10.0;

/// Zoom level a focus move eases to.
pub const FOCUS_ZOOM: f32 = 2.0;

/// Duration of a focus move in seconds.
pub const FOCUS_DURATION: f32 = 0.5;

/// Marker component for the main camera.
#[derive(Component)]
pub struct MainCamera;

/// Center and zoom of the view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewPose {
    /// World point at the middle of the screen
    pub center: Vec2,
    /// Screen pixels per world unit
    pub zoom: f32,
}

impl Default for ViewPose {
    fn default() -> Self {
        Self {
            center: Vec2::ZERO,
            zoom: DEFAULT_ZOOM,
        }
    }
}

impl ViewPose {
    fn lerp(self, end: ViewPose, t: f32) -> ViewPose {
        ViewPose {
            center: self.center.lerp(end.center, t),
            zoom: self.zoom + (end.zoom - self.zoom) * t,
        }
    }
}

/// Focus easing state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViewTransition {
    Idle,
    Transitioning {
        /// Fraction of [`FOCUS_DURATION`] elapsed, in [0, 1]
        progress: f32,
        start: ViewPose,
        end: ViewPose,
    },
}

/// View state driven by input and the focused body.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct ViewTransform {
    pose: ViewPose,
    transition: ViewTransition,
    /// Id of the body the view follows
    focus: Option<String>,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            pose: ViewPose::default(),
            transition: ViewTransition::Idle,
            focus: None,
        }
    }
}

impl ViewTransform {
    pub fn pose(&self) -> ViewPose {
        self.pose
    }

    pub fn transition(&self) -> ViewTransition {
        self.transition
    }

    pub fn focus(&self) -> Option<&str> {
        self.focus.as_deref()
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.transition, ViewTransition::Transitioning { .. })
    }

    /// Start easing toward `target` and follow body `id` afterwards.
    pub fn focus_on(&mut self, id: impl Into<String>, target: Vec2) {
        self.focus = Some(id.into());
        self.transition = ViewTransition::Transitioning {
            progress: 0.0,
            start: self.pose,
            end: ViewPose {
                center: target,
                zoom: FOCUS_ZOOM,
            },
        };
    }

    /// Stop following and drop any focus move in flight, keeping the pose.
    pub fn release(&mut self) {
        self.focus = None;
        self.transition = ViewTransition::Idle;
    }

    /// Move the view by a world-space offset. Cancels focus.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.release();
        self.pose.center += delta;
    }

    /// Change zoom by `steps` multiples of [`ZOOM_STEP`], clamped.
    ///
    /// Keeps following the focused body; a focus move in flight keeps its
    /// center target but lands on the new zoom.
    pub fn zoom_by(&mut self, steps: f32) {
        let delta = steps * ZOOM_STEP;
        self.pose.zoom = (self.pose.zoom + delta).clamp(MIN_ZOOM, MAX_ZOOM);
        if let ViewTransition::Transitioning { end, .. } = &mut self.transition {
            end.zoom = (end.zoom + delta).clamp(MIN_ZOOM, MAX_ZOOM);
        }
    }

    /// Return to the startup pose with no focus.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Advance easing by `dt` real seconds.
    ///
    /// `target` is the followed body's current position, or `None` when
    /// it is gone or hidden. An active move retargets to it every frame;
    /// once idle the view tracks it directly.
    pub fn advance(&mut self, dt: f32, target: Option<Vec2>) {
        match &mut self.transition {
            ViewTransition::Transitioning {
                progress,
                start,
                end,
            } => {
                if let Some(target) = target {
                    end.center = target;
                }
                *progress = (*progress + dt / FOCUS_DURATION).min(1.0);
                self.pose = start.lerp(*end, ease_in_out_cubic(*progress));
                if *progress >= 1.0 {
                    self.transition = ViewTransition::Idle;
                }
            }
            ViewTransition::Idle => {
                if let (Some(_), Some(target)) = (&self.focus, target) {
                    self.pose.center = target;
                }
            }
        }
    }

    /// World units covered by one screen pixel.
    pub fn world_per_pixel(&self) -> f32 {
        1.0 / self.pose.zoom
    }
}

/// Cubic ease-in-out on [0, 1].
pub fn ease_in_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Plugin providing camera functionality.
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ViewTransform>()
            .add_systems(Startup, setup_camera)
            .add_systems(Update, (camera_zoom, camera_pan).before(SimulationSet::Present))
            .add_systems(Update, apply_view.in_set(SimulationSet::Present));
    }
}

/// Spawn the main camera with orthographic projection looking down -Z.
fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Projection::from(OrthographicProjection {
            scale: 1.0 / DEFAULT_ZOOM,
            near: -10000.0,
            far: 10000.0,
            ..OrthographicProjection::default_3d()
        }),
        Transform::from_xyz(0.0, 0.0, 1000.0).looking_at(Vec3::ZERO, Vec3::Y),
        MainCamera,
    ));
}

/// Handle mouse scroll wheel for zoom. Scrolling drops the focus.
fn camera_zoom(
    mouse_scroll: Res<AccumulatedMouseScroll>,
    mut contexts: EguiContexts,
    mut view: ResMut<ViewTransform>,
) {
    if mouse_scroll.delta.y == 0.0 {
        return;
    }
    if let Ok(ctx) = contexts.ctx_mut() {
        if ctx.wants_pointer_input() || ctx.is_pointer_over_area() {
            return;
        }
    }

    view.release();
    view.zoom_by(mouse_scroll.delta.y.signum());
}

/// Handle middle mouse button drag for panning.
fn camera_pan(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mut view: ResMut<ViewTransform>,
) {
    if !mouse_buttons.pressed(MouseButton::Middle) || mouse_motion.delta == Vec2::ZERO {
        return;
    }

    // Screen Y grows downward; world Y grows upward
    let scale = view.world_per_pixel();
    let delta = Vec2::new(-mouse_motion.delta.x, mouse_motion.delta.y) * scale;
    view.pan_by(delta);
}

/// Ease the view, then write the pose into the camera.
fn apply_view(
    time: Res<Time<Real>>,
    simulation: Res<Simulation>,
    mut view: ResMut<ViewTransform>,
    mut camera_query: Query<(&mut Transform, &mut Projection), With<MainCamera>>,
) {
    let target = view
        .focus()
        .and_then(|id| simulation.body(id))
        .filter(|body| body.is_visible())
        .map(|body| body.position().truncate().as_vec2());
    view.advance(time.delta_secs(), target);

    let Ok((mut transform, mut projection)) = camera_query.single_mut() else {
        return;
    };

    let pose = view.pose();
    transform.translation.x = pose.center.x;
    transform.translation.y = pose.center.y;

    if let Projection::Orthographic(ortho) = &mut *projection {
        ortho.scale = 1.0 / pose.zoom;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_easing_endpoints() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);
        assert_relative_eq!(ease_in_out_cubic(0.5), 0.5);
        assert!(ease_in_out_cubic(0.25) < 0.25);
        assert!(ease_in_out_cubic(0.75) > 0.75);
    }

    #[test]
    fn test_focus_reaches_target() {
        let mut view = ViewTransform::default();
        let target = Vec2::new(200.0, -50.0);
        view.focus_on("earth", target);
        assert!(view.is_transitioning());

        // 0.5s at 60 fps
        for _ in 0..30 {
            view.advance(1.0 / 60.0, Some(target));
        }
        view.advance(1.0 / 60.0, Some(target));

        assert!(!view.is_transitioning());
        assert_eq!(view.pose().center, target);
        assert_eq!(view.pose().zoom, FOCUS_ZOOM);
        assert_eq!(view.focus(), Some("earth"));
    }

    #[test]
    fn test_focus_eases_midway() {
        let mut view = ViewTransform::default();
        view.focus_on("earth", Vec2::new(100.0, 0.0));
        view.advance(FOCUS_DURATION / 2.0, Some(Vec2::new(100.0, 0.0)));
        assert_relative_eq!(view.pose().center.x, 50.0, epsilon = 1e-3);
        assert_relative_eq!(view.pose().zoom, 1.5, epsilon = 1e-4);
    }

    #[test]
    fn test_idle_view_follows_focus() {
        let mut view = ViewTransform::default();
        view.focus_on("earth", Vec2::new(10.0, 0.0));
        view.advance(1.0, Some(Vec2::new(10.0, 0.0)));
        view.advance(0.016, Some(Vec2::new(12.0, 3.0)));
        assert_eq!(view.pose().center, Vec2::new(12.0, 3.0));

        // Lost target: hold position
        view.advance(0.016, None);
        assert_eq!(view.pose().center, Vec2::new(12.0, 3.0));
    }

    #[test]
    fn test_pan_cancels_focus() {
        let mut view = ViewTransform::default();
        view.focus_on("earth", Vec2::new(100.0, 0.0));
        view.advance(0.1, Some(Vec2::new(100.0, 0.0)));
        let before = view.pose().center;

        view.pan_by(Vec2::new(5.0, 5.0));
        assert!(view.focus().is_none());
        assert!(!view.is_transitioning());
        assert_eq!(view.pose().center, before + Vec2::new(5.0, 5.0));

        view.advance(0.1, Some(Vec2::new(100.0, 0.0)));
        assert_eq!(view.pose().center, before + Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_zoom_clamped() {
        let mut view = ViewTransform::default();
        view.zoom_by(1000.0);
        assert_eq!(view.pose().zoom, MAX_ZOOM);
        view.zoom_by(-1000.0);
        assert_eq!(view.pose().zoom, MIN_ZOOM);
        view.reset();
        view.zoom_by(1.0);
        assert_relative_eq!(view.pose().zoom, 1.1);
    }

    #[test]
    fn test_reset_restores_default() {
        let mut view = ViewTransform::default();
        view.focus_on("mars", Vec2::new(1.0, 1.0));
        view.advance(0.2, None);
        view.reset();
        assert_eq!(view, ViewTransform::default());
    }
}
