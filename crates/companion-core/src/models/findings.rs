//! Lung ultrasound finding models.

use serde::{Deserialize, Serialize};

/// Hemithorax side.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Side {
    Right,
    Left,
}

impl Side {
    pub fn label(&self) -> &'static str {
        match self {
            Side::Right => "right",
            Side::Left => "left",
        }
    }
}

/// One of the eight scanned anatomical zones.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Zone {
    R1,
    R2,
    R3,
    R4,
    L1,
    L2,
    L3,
    L4,
}

impl Zone {
    /// All zones in scanning order.
    pub const ALL: [Zone; 8] = [
        Zone::R1,
        Zone::R2,
        Zone::R3,
        Zone::R4,
        Zone::L1,
        Zone::L2,
        Zone::L3,
        Zone::L4,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Zone::R1 => "R1",
            Zone::R2 => "R2",
            Zone::R3 => "R3",
            Zone::R4 => "R4",
            Zone::L1 => "L1",
            Zone::L2 => "L2",
            Zone::L3 => "L3",
            Zone::L4 => "L4",
        }
    }

    /// Zone checked for parenchymal findings adjacent to an effusion.
    pub fn adjacent_to_effusion(side: Side) -> Zone {
        match side {
            Side::Right => Zone::R4,
            Side::Left => Zone::L4,
        }
    }

    fn index(&self) -> usize {
        Zone::ALL.iter().position(|z| z == self).unwrap_or(0)
    }
}

/// Sonographic pattern observed in a single zone.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ZoneFindings {
    /// A-line present
    pub a_line: bool,
    /// B-line present
    pub b_line: bool,
    /// Lung sliding present
    pub sliding: bool,
    /// Shred sign present
    pub shred: bool,
}

impl Default for ZoneFindings {
    /// A fresh zone reads as a normal study: A-lines with sliding.
    fn default() -> Self {
        Self {
            a_line: true,
            b_line: false,
            sliding: true,
            shred: false,
        }
    }
}

/// Findings for all eight zones.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct LungSurvey {
    zones: [ZoneFindings; 8],
}

impl LungSurvey {
    pub fn zone(&self, zone: Zone) -> &ZoneFindings {
        &self.zones[zone.index()]
    }

    pub fn zone_mut(&mut self, zone: Zone) -> &mut ZoneFindings {
        &mut self.zones[zone.index()]
    }

    /// Count zones matching a predicate.
    pub fn count<F: Fn(&ZoneFindings) -> bool>(&self, pred: F) -> usize {
        self.zones.iter().filter(|z| pred(z)).count()
    }
}

/// Echogenicity of an effusion pool.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Echogenicity {
    #[default]
    Anechoic,
    ComplexNonSeptated,
    ComplexSeptated,
    /// Homogeneously echogenic
    Echogenic,
}

impl Echogenicity {
    pub fn is_anechoic(&self) -> bool {
        matches!(self, Echogenicity::Anechoic)
    }
}

/// Pleural effusion observations for one side.
///
/// The three geometric measurements feed two independent volume-estimate
/// formulas: height and basal depth for the dimension method, interpleural
/// distance for the Balik method.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct EffusionFindings {
    /// Effusion seen on this side
    pub present: bool,
    /// Deepest fluid pool in cm
    pub deepest_pool_cm: Option<f64>,
    /// Fluid echogenicity
    pub echogenicity: Echogenicity,
    /// Septations within the fluid
    pub septations: bool,
    /// Nodules on the diaphragmatic pleura
    pub diaphragmatic_nodules: bool,
    /// Pleural thickness in cm
    pub pleural_thickness_cm: Option<f64>,
    /// Craniocaudal effusion height in cm (H)
    pub height_cm: Option<f64>,
    /// Lung-base to mid-diaphragm distance in cm (D)
    pub basal_depth_cm: Option<f64>,
    /// End-expiratory interpleural distance in cm (C)
    pub interpleural_distance_cm: Option<f64>,
}

impl EffusionFindings {
    /// Echogenic fluid or septations, suggesting an exudate.
    pub fn has_complex_features(&self) -> bool {
        !self.echogenicity.is_anechoic() || self.septations
    }

    /// Nodules or thickening > 1 cm, raising suspicion for malignancy.
    pub fn has_malignancy_features(&self) -> bool {
        self.diaphragmatic_nodules || self.pleural_thickness_cm.map_or(false, |t| t > 1.0)
    }
}
