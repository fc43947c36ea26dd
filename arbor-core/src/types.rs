//! Ids and wire-format enumerations.
//!
//! Every enum that crosses the guest/host boundary derives `FromPrimitive`;
//! decoding goes through `from_u32` and an unknown discriminant is a hard
//! decode error, never a silent default.

use num_derive::FromPrimitive;

/// Engine-wide resource handle. `0` is reserved as "null/absent".
pub type ResourceId = u32;

/// The reserved null handle.
pub const NIL_RESOURCE_ID: ResourceId = 0;

/// Tag for every resource variant in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, strum::Display)]
pub enum ResourceKind {
    Node = 1,
    Scene = 2,
    Mesh = 3,
    MeshPrimitive = 4,
    Accessor = 5,
    Buffer = 6,
    BufferView = 7,
    Material = 8,
    Texture = 9,
    Light = 10,
    Collider = 11,
    Interactable = 12,
    UiCanvas = 13,
    UiElement = 14,
    UiButton = 15,
    UiText = 16,
}

/// Mesh primitive topology, glTF mode codes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromPrimitive)]
pub enum PrimitiveMode {
    Points = 0,
    Lines = 1,
    LineLoop = 2,
    LineStrip = 3,
    #[default]
    Triangles = 4,
    TriangleStrip = 5,
    TriangleFan = 6,
}

/// Vertex attribute slot for a mesh primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
pub enum AttributeKey {
    Position = 0,
    Normal = 1,
    Tangent = 2,
    TexCoord0 = 3,
    TexCoord1 = 4,
    Color0 = 5,
    Joints0 = 6,
    Weights0 = 7,
}

/// Accessor component type, glTF componentType codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
pub enum ComponentType {
    I8 = 5120,
    U8 = 5121,
    I16 = 5122,
    U16 = 5123,
    U32 = 5125,
    F32 = 5126,
}

impl ComponentType {
    pub fn byte_size(self) -> usize {
        match self {
            ComponentType::I8 | ComponentType::U8 => 1,
            ComponentType::I16 | ComponentType::U16 => 2,
            ComponentType::U32 | ComponentType::F32 => 4,
        }
    }
}

/// Element shape of an accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
pub enum AccessorShape {
    Scalar = 0,
    Vec2 = 1,
    Vec3 = 2,
    Vec4 = 3,
    Mat2 = 4,
    Mat3 = 5,
    Mat4 = 6,
}

impl AccessorShape {
    pub fn component_count(self) -> usize {
        match self {
            AccessorShape::Scalar => 1,
            AccessorShape::Vec2 => 2,
            AccessorShape::Vec3 => 3,
            AccessorShape::Vec4 => 4,
            AccessorShape::Mat2 => 4,
            AccessorShape::Mat3 => 9,
            AccessorShape::Mat4 => 16,
        }
    }
}

/// Material alpha blending mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromPrimitive)]
pub enum AlphaMode {
    #[default]
    Opaque = 0,
    Mask = 1,
    Blend = 2,
}

/// Texture coordinate wrap mode, glTF sampler codes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromPrimitive)]
pub enum WrapMode {
    #[default]
    Repeat = 10497,
    ClampToEdge = 33071,
    MirroredRepeat = 33648,
}

/// Texture sampler filter, glTF sampler codes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromPrimitive)]
pub enum FilterMode {
    Nearest = 9728,
    #[default]
    Linear = 9729,
}

/// Material texture slot selector used by `material_set_texture`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
pub enum TextureSlot {
    BaseColor = 0,
    MetallicRoughness = 1,
    Normal = 2,
    Occlusion = 3,
    Emissive = 4,
}

/// Punctual light flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
pub enum LightKind {
    Directional = 0,
    Point = 1,
    Spot = 2,
}

/// Collider shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
pub enum ColliderKind {
    Cuboid = 0,
    Sphere = 1,
    Capsule = 2,
    Cylinder = 3,
    Hull = 4,
    Trimesh = 5,
}

/// Physics body flavor attached to a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
pub enum BodyKind {
    Static = 0,
    Kinematic = 1,
    Rigid = 2,
}

/// Interactable flavor. The zero value is deliberately unassigned so that a
/// zeroed parameter block never decodes to a valid interactable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
pub enum InteractableKind {
    Interactable = 1,
    Grabbable = 2,
}

/// Main axis of a UI flex container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromPrimitive)]
pub enum FlexDirection {
    #[default]
    Column = 0,
    ColumnReverse = 1,
    Row = 2,
    RowReverse = 3,
}
