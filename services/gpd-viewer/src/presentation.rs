//! Presentation parameters for the two framings of the slice surface.
//!
//! Both presets consume the same [`RenderableGrid`](renderer::RenderableGrid);
//! they only differ in camera, controls and the inset axis widget. Surfaces
//! that draw in 3D read these values, headless surfaces just record them.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use gpd_common::{GpdError, GpdResult};

/// Built-in presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetName {
    Orbit,
    Framed,
}

impl PresetName {
    pub fn name(&self) -> &'static str {
        match self {
            PresetName::Orbit => "orbit",
            PresetName::Framed => "framed",
        }
    }
}

impl FromStr for PresetName {
    type Err = GpdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "orbit" => Ok(PresetName::Orbit),
            "framed" => Ok(PresetName::Framed),
            _ => Err(GpdError::InvalidConfig(format!(
                "unknown presentation preset '{}'",
                s
            ))),
        }
    }
}

impl fmt::Display for PresetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Perspective camera of the main view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
    #[serde(default)]
    pub target: [f32; 3],
}

/// Trackball controller tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackballConfig {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub pan_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisLabel {
    pub text: String,
    /// CSS-style colour, e.g. `#ff0000`.
    pub color: String,
    pub position: [f32; 3],
}

/// Inset orientation widget drawn in a corner viewport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisWidgetConfig {
    /// `[x, y, width, height]` in pixels from the bottom-left corner.
    pub viewport: [u32; 4],
    /// Half extent of the orthographic frustum.
    pub half_extent: f32,
    pub axes_size: f32,
    pub labels: Vec<AxisLabel>,
}

impl AxisWidgetConfig {
    /// The widget camera looks from the main camera's direction at unit
    /// distance, so the inset mirrors the main view's orientation.
    pub fn camera_position(&self, main_camera: [f32; 3]) -> [f32; 3] {
        let [x, y, z] = main_camera;
        let len = (x * x + y * y + z * z).sqrt();
        if len == 0.0 {
            return [0.0, 0.0, 1.0];
        }
        [x / len, y / len, z / len]
    }
}

/// Static scene decorations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    pub grid_helper_size: f32,
    pub grid_helper_divisions: u32,
    pub axes_helper_size: f32,
    pub ambient_light_intensity: f32,
    pub wireframe: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            grid_helper_size: 10.0,
            grid_helper_divisions: 10,
            axes_helper_size: 5.0,
            ambient_light_intensity: 2.0,
            wireframe: true,
        }
    }
}

/// Everything a surface needs besides the grid itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Presentation {
    pub name: String,
    pub camera: CameraConfig,
    pub controls: TrackballConfig,
    pub axis_widget: AxisWidgetConfig,
    #[serde(default)]
    pub scene: SceneConfig,
}

fn default_labels() -> Vec<AxisLabel> {
    vec![
        AxisLabel {
            text: "xi".to_string(),
            color: "#ff0000".to_string(),
            position: [1.2, 0.0, 0.0],
        },
        AxisLabel {
            text: "Q2".to_string(),
            color: "#00ff00".to_string(),
            position: [0.0, 1.2, 0.0],
        },
        AxisLabel {
            text: "GPD".to_string(),
            color: "#0000ff".to_string(),
            position: [0.0, 0.0, 1.2],
        },
    ]
}

impl Presentation {
    /// Free orbit around the surface from just in front of it.
    pub fn orbit() -> Self {
        Self {
            name: PresetName::Orbit.name().to_string(),
            camera: CameraConfig {
                fov_deg: 75.0,
                near: 0.1,
                far: 1000.0,
                position: [0.0, 0.0, 0.7],
                target: [0.0, 0.0, 0.0],
            },
            controls: TrackballConfig {
                rotate_speed: 10.0,
                zoom_speed: 1.2,
                pan_speed: 10.0,
                pan_enabled: true,
            },
            axis_widget: AxisWidgetConfig {
                viewport: [10, 10, 150, 150],
                half_extent: 2.0,
                axes_size: 1.0,
                labels: default_labels(),
            },
            scene: SceneConfig::default(),
        }
    }

    /// Oblique view of the unit square with panning locked.
    pub fn framed() -> Self {
        Self {
            name: PresetName::Framed.name().to_string(),
            camera: CameraConfig {
                fov_deg: 50.0,
                near: 0.1,
                far: 1000.0,
                position: [0.5, -1.2, 1.6],
                target: [0.5, 0.5, 0.5],
            },
            controls: TrackballConfig {
                rotate_speed: 5.0,
                zoom_speed: 1.2,
                pan_speed: 0.0,
                pan_enabled: false,
            },
            axis_widget: AxisWidgetConfig {
                viewport: [10, 10, 200, 200],
                half_extent: 2.0,
                axes_size: 1.0,
                labels: default_labels(),
            },
            scene: SceneConfig::default(),
        }
    }

    pub fn preset(name: PresetName) -> Self {
        match name {
            PresetName::Orbit => Self::orbit(),
            PresetName::Framed => Self::framed(),
        }
    }

    /// Parse a full presentation from YAML.
    pub fn from_yaml(yaml: &str) -> GpdResult<Self> {
        let presentation: Self = serde_yaml::from_str(yaml)
            .map_err(|e| GpdError::InvalidConfig(format!("presentation YAML: {}", e)))?;
        presentation.validate()?;
        Ok(presentation)
    }

    /// Load a presentation override file.
    pub fn from_yaml_file(path: &Path) -> GpdResult<Self> {
        let yaml = std::fs::read_to_string(path).map_err(|e| {
            GpdError::InvalidConfig(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_yaml(&yaml)
    }

    pub fn validate(&self) -> GpdResult<()> {
        let camera = &self.camera;
        if !(camera.fov_deg > 0.0 && camera.fov_deg < 180.0) {
            return Err(GpdError::InvalidConfig(format!(
                "camera fov {} must be in (0, 180)",
                camera.fov_deg
            )));
        }
        if !(camera.near > 0.0 && camera.near < camera.far) {
            return Err(GpdError::InvalidConfig(format!(
                "camera clip planes near={} far={} must satisfy 0 < near < far",
                camera.near, camera.far
            )));
        }
        let [_, _, w, h] = self.axis_widget.viewport;
        if w == 0 || h == 0 {
            return Err(GpdError::InvalidConfig(
                "axis widget viewport must have a non-zero size".to_string(),
            ));
        }
        if self.axis_widget.half_extent <= 0.0 {
            return Err(GpdError::InvalidConfig(
                "axis widget half extent must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orbit_preset_values() {
        let p = Presentation::orbit();
        assert_eq!(p.name, "orbit");
        assert_eq!(p.camera.fov_deg, 75.0);
        assert_eq!(p.camera.position, [0.0, 0.0, 0.7]);
        assert_eq!(p.controls.rotate_speed, 10.0);
        assert_eq!(p.controls.zoom_speed, 1.2);
        assert!(p.controls.pan_enabled);
        assert_eq!(p.axis_widget.viewport, [10, 10, 150, 150]);

        let texts: Vec<&str> = p.axis_widget.labels.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["xi", "Q2", "GPD"]);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_framed_differs_only_in_framing() {
        let orbit = Presentation::orbit();
        let framed = Presentation::framed();
        assert_ne!(orbit.camera, framed.camera);
        assert!(!framed.controls.pan_enabled);
        assert!(framed.axis_widget.viewport[2] > orbit.axis_widget.viewport[2]);
        assert_eq!(orbit.axis_widget.labels, framed.axis_widget.labels);
        assert_eq!(orbit.scene, framed.scene);
        assert!(framed.validate().is_ok());
    }

    #[test]
    fn test_preset_names() {
        assert_eq!("orbit".parse::<PresetName>().unwrap(), PresetName::Orbit);
        assert_eq!("FRAMED".parse::<PresetName>().unwrap(), PresetName::Framed);
        assert!("side".parse::<PresetName>().is_err());
        assert_eq!(Presentation::preset(PresetName::Framed).name, "framed");
    }

    #[test]
    fn test_widget_camera_mirrors_main_camera() {
        let widget = Presentation::orbit().axis_widget;
        assert_eq!(widget.camera_position([0.0, 0.0, 0.7]), [0.0, 0.0, 1.0]);
        assert_eq!(widget.camera_position([3.0, 4.0, 0.0]), [0.6, 0.8, 0.0]);
        assert_eq!(widget.camera_position([0.0, 0.0, 0.0]), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_yaml_round_trip_and_override() {
        let mut custom = Presentation::orbit();
        custom.name = "wide".to_string();
        custom.camera.fov_deg = 90.0;

        let yaml = serde_yaml::to_string(&custom).unwrap();
        let parsed = Presentation::from_yaml(&yaml).unwrap();
        assert_eq!(parsed, custom);
    }

    #[test]
    fn test_yaml_scene_defaults() {
        let yaml = r##"
name: minimal
camera:
  fov_deg: 60.0
  near: 0.5
  far: 50.0
  position: [0.0, 0.0, 2.0]
controls:
  rotate_speed: 1.0
  zoom_speed: 1.0
  pan_speed: 1.0
  pan_enabled: true
axis_widget:
  viewport: [0, 0, 100, 100]
  half_extent: 1.5
  axes_size: 1.0
  labels: []
"##;
        let p = Presentation::from_yaml(yaml).unwrap();
        assert_eq!(p.camera.target, [0.0, 0.0, 0.0]);
        assert_eq!(p.scene, SceneConfig::default());
    }

    #[test]
    fn test_invalid_yaml_rejected() {
        let mut p = Presentation::orbit();
        p.camera.near = 10.0;
        p.camera.far = 1.0;
        assert!(matches!(p.validate(), Err(GpdError::InvalidConfig(_))));

        assert!(matches!(
            Presentation::from_yaml("name: [unclosed"),
            Err(GpdError::InvalidConfig(_))
        ));
    }
}
