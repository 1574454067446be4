use crate::measurement::MeasurementKey;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use MeasurementKey as M;

/// Population variant. Each one pairs with its own dataset document.
#[derive(Debug, Clone, Copy, EnumIter, EnumString, Display, PartialEq, Eq, Hash)]
#[strum(serialize_all = "snake_case")]
pub enum Variant {
    Female,
    Male,
}

/// One link of the segment chain, keyed in datasets by its snake_case name.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    EnumString,
    Display,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(try_from = "String", into = "String")]
pub enum Segment {
    Spine,
    Thigh,
    Calf,
    Feet,
    Neck,
    UpperArm,
    Forearm,
    Hand,
}

impl TryFrom<String> for Segment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse().map_err(|_| format!("unknown segment '{}'", s))
    }
}

impl From<Segment> for String {
    fn from(seg: Segment) -> Self {
        seg.to_string()
    }
}

impl Segment {
    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// How the composite "Cup" measurement is derived from two girths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CupRule {
    pub minuend: MeasurementKey,
    pub subtrahend: MeasurementKey,
    /// Copy the minuend under this label as well (the male rig reads `Bust`).
    pub mirror: Option<MeasurementKey>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoneSlot {
    pub segment: Segment,
    /// Name used by the measurement tables.
    pub internal: &'static str,
    /// Name of the bone inside the rigged mesh.
    pub rig: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeKeySlot {
    /// Identifier used by `shape_key_map` and the coefficient matrix rows.
    pub id: &'static str,
    /// Morph target name on the mesh.
    pub output: &'static str,
}

/// Segment order of the propagation chain. Each stage reads the previous one.
pub static SEGMENT_CHAIN: [Segment; 8] = [
    Segment::Spine,
    Segment::Thigh,
    Segment::Calf,
    Segment::Feet,
    Segment::Neck,
    Segment::UpperArm,
    Segment::Forearm,
    Segment::Hand,
];

const fn bone(segment: Segment, internal: &'static str, rig: &'static str) -> BoneSlot {
    BoneSlot {
        segment,
        internal,
        rig,
    }
}

static RIG_BONES: [BoneSlot; 14] = [
    bone(Segment::Spine, "spine", "spine"),
    bone(Segment::Thigh, "thigh.R", "thighR"),
    bone(Segment::Thigh, "thigh.L", "thighL"),
    bone(Segment::Calf, "shin.R", "shinR"),
    bone(Segment::Calf, "shin.L", "shinL"),
    bone(Segment::Feet, "foot.R", "footR"),
    bone(Segment::Feet, "foot.L", "footL"),
    bone(Segment::Neck, "neck", "neck"),
    bone(Segment::UpperArm, "upper_arm.R", "upper_armR"),
    bone(Segment::UpperArm, "upper_arm.L", "upper_armL"),
    bone(Segment::Forearm, "forearm.R", "forearmR"),
    bone(Segment::Forearm, "forearm.L", "forearmL"),
    bone(Segment::Hand, "hand.R", "handR"),
    bone(Segment::Hand, "hand.L", "handL"),
];

const fn shape_key(id: &'static str, output: &'static str) -> ShapeKeySlot {
    ShapeKeySlot { id, output }
}

static BODY_SHAPE_KEYS: [ShapeKeySlot; 12] = [
    shape_key("b_Torso_Shoulder_Width", "b_{Torso}_Shoulder Width"),
    shape_key("b_Torso_Chest_Width", "b_{Torso}_Chest Width"),
    shape_key("b_Torso_Waist_Thickness", "b_{Torso}_Waist Thickness"),
    shape_key("b_Torso_Hips_Size", "b_{Torso}_Hips Size"),
    shape_key("b_Torso_Belly_Size", "b_{Torso}_Belly Size"),
    shape_key("b_Torso_Breast_Size", "b_{Torso}_Breast Size"),
    shape_key("b_Legs_Thigh_Thickness", "b_{Legs}_Thigh Thickness"),
    shape_key("b_Arms_Upper_Arm_Thickness", "b_{Arms}_Upper Arm Thickness"),
    shape_key("b_Legs_Shin_Thickness", "b_{Legs}_Shin Thickness"),
    shape_key("b_Arms_Forearm_Thickness", "b_{Arms}_Forearm Thickness"),
    shape_key("b_Arms_Hand_Thickness", "b_{Arms}_Hand Thickness"),
    shape_key("b_Head_Neck_Thickness", "b_{Head}_Neck Thickness"),
];

/// Output names of the three size-category fractions, in output order.
pub const CATEGORY_OUTPUTS: [&str; 3] = [
    "b_{main}_overweight",
    "b_{main}_skinny",
    "b_{main}_muscular",
];

const COMMON_KEYS: [MeasurementKey; 21] = [
    M::Height,
    M::ThighLength,
    M::CalfLength,
    M::FeetLength,
    M::NeckLength,
    M::ShoulderWidth,
    M::UpperArmLength,
    M::ForearmLength,
    M::HandLength,
    M::Muscle,
    M::BodyFat,
    M::NeckThickness,
    M::Cup,
    M::Waist,
    M::Belly,
    M::Hips,
    M::ThighSize,
    M::CalfSize,
    M::UpperArmSize,
    M::ForearmSize,
    M::HandSize,
];

/// Accepted by both variants but never propagated; the rendering layer reads them.
pub const PASSTHROUGH_KEYS: [MeasurementKey; 4] = [
    M::HeadScale,
    M::HeadRotationX,
    M::HeadRotationY,
    M::HeadRotationZ,
];

impl Variant {
    pub fn cup_rule(self) -> CupRule {
        match self {
            Self::Female => CupRule {
                minuend: M::Bust,
                subtrahend: M::Underbust,
                mirror: None,
            },
            Self::Male => CupRule {
                minuend: M::Chest,
                subtrahend: M::Rib,
                mirror: Some(M::Bust),
            },
        }
    }

    /// Whether a dataset for this variant may propagate `key`.
    pub fn accepts(self, key: MeasurementKey) -> bool {
        if COMMON_KEYS.contains(&key) {
            return true;
        }
        let rule = self.cup_rule();
        key == rule.minuend || key == rule.subtrahend || rule.mirror == Some(key)
    }

    pub fn segments(self) -> &'static [Segment] {
        &SEGMENT_CHAIN
    }

    pub fn bones(self) -> &'static [BoneSlot] {
        &RIG_BONES
    }

    pub fn shape_keys(self) -> &'static [ShapeKeySlot] {
        &BODY_SHAPE_KEYS
    }

    /// Conventional file name of this variant's dataset.
    pub fn dataset_file(self) -> String {
        format!("{}.json", self)
    }
}
