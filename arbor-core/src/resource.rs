//! The engine resource model.
//!
//! A closed tagged union: one variant per resource kind, each carrying only
//! the fields that kind needs. Scripts never hold these — they hold ids and
//! every access goes through the registry and a capability check.

use bitflags::bitflags;
use glam::{Quat, Vec3};
use smallvec::SmallVec;

use crate::types::{
    AccessorShape, AlphaMode, AttributeKey, BodyKind, ColliderKind, ComponentType, FilterMode,
    FlexDirection, InteractableKind, LightKind, PrimitiveMode, ResourceId, ResourceKind, WrapMode,
    NIL_RESOURCE_ID,
};

/// Opaque handle into a collaborator (physics body, audio emitter).
pub type ExternHandle = u64;

bitflags! {
    /// Per-tick interaction state mirrored from the input collaborator.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct InteractableState: u32 {
        const PRESSED = 1 << 0;
        const HELD = 1 << 1;
        const RELEASED = 1 << 2;
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub name: Option<String>,
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    /// Stored verbatim when the guest sets an explicit local matrix; reads
    /// return the exact bits that were written.
    pub local_matrix: Option<[f32; 16]>,
    pub visible: bool,
    pub mesh: ResourceId,
    pub light: ResourceId,
    pub collider: ResourceId,
    pub ui_canvas: ResourceId,
    pub interactable: ResourceId,
    pub body: Option<(BodyKind, ExternHandle)>,
    pub audio_emitter: Option<ExternHandle>,
    // intrusive hierarchy links; parent may be a Node or a Scene
    pub parent: ResourceId,
    pub first_child: ResourceId,
    pub next_sibling: ResourceId,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            name: None,
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            local_matrix: None,
            visible: true,
            mesh: NIL_RESOURCE_ID,
            light: NIL_RESOURCE_ID,
            collider: NIL_RESOURCE_ID,
            ui_canvas: NIL_RESOURCE_ID,
            interactable: NIL_RESOURCE_ID,
            body: None,
            audio_emitter: None,
            parent: NIL_RESOURCE_ID,
            first_child: NIL_RESOURCE_ID,
            next_sibling: NIL_RESOURCE_ID,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub name: Option<String>,
    pub first_node: ResourceId,
}

#[derive(Debug, Clone)]
pub struct MeshAttribute {
    pub key: AttributeKey,
    pub accessor: ResourceId,
}

#[derive(Debug, Clone)]
pub struct MeshPrimitive {
    pub mode: PrimitiveMode,
    pub indices: ResourceId,
    pub material: ResourceId,
    pub attributes: SmallVec<[MeshAttribute; 4]>,
}

#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub name: Option<String>,
    pub primitives: Vec<ResourceId>,
}

#[derive(Debug, Clone)]
pub struct Accessor {
    pub buffer_view: ResourceId,
    pub component_type: ComponentType,
    pub shape: AccessorShape,
    pub count: u32,
    pub normalized: bool,
    /// Only dynamic accessors accept `accessor_update_with` writes.
    pub dynamic: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Buffer {
    pub name: Option<String>,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct BufferView {
    pub buffer: ResourceId,
    pub byte_offset: u32,
    pub byte_length: u32,
    pub byte_stride: u32,
}

#[derive(Debug, Clone)]
pub struct Material {
    pub name: Option<String>,
    pub base_color_factor: [f32; 4],
    pub metallic_factor: f32,
    pub roughness_factor: f32,
    pub emissive_factor: [f32; 3],
    pub emissive_strength: f32,
    pub alpha_mode: AlphaMode,
    pub alpha_cutoff: f32,
    pub double_sided: bool,
    pub base_color_texture: ResourceId,
    pub metallic_roughness_texture: ResourceId,
    pub normal_texture: ResourceId,
    pub occlusion_texture: ResourceId,
    pub emissive_texture: ResourceId,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: None,
            base_color_factor: [1.0; 4],
            metallic_factor: 1.0,
            roughness_factor: 1.0,
            emissive_factor: [0.0; 3],
            emissive_strength: 1.0,
            alpha_mode: AlphaMode::Opaque,
            alpha_cutoff: 0.5,
            double_sided: false,
            base_color_texture: NIL_RESOURCE_ID,
            metallic_roughness_texture: NIL_RESOURCE_ID,
            normal_texture: NIL_RESOURCE_ID,
            occlusion_texture: NIL_RESOURCE_ID,
            emissive_texture: NIL_RESOURCE_ID,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Texture {
    pub name: Option<String>,
    pub source: ResourceId,
    pub wrap_s: WrapMode,
    pub wrap_t: WrapMode,
    pub mag_filter: FilterMode,
    pub min_filter: FilterMode,
}

#[derive(Debug, Clone)]
pub struct Light {
    pub name: Option<String>,
    pub kind: LightKind,
    pub color: [f32; 3],
    pub intensity: f32,
    pub range: f32,
    pub inner_cone_angle: f32,
    pub outer_cone_angle: f32,
}

#[derive(Debug, Clone)]
pub struct Collider {
    pub kind: ColliderKind,
    pub is_trigger: bool,
    pub size: [f32; 3],
    pub radius: f32,
    pub height: f32,
    pub mesh: ResourceId,
}

#[derive(Debug, Clone)]
pub struct Interactable {
    pub kind: InteractableKind,
    pub node: ResourceId,
    pub state: InteractableState,
}

#[derive(Debug, Clone)]
pub struct UiCanvas {
    pub root: ResourceId,
    pub size: [f32; 2],
    pub width: f32,
    pub height: f32,
    pub redraw_requested: bool,
    /// Side objects allocated at creation time.
    pub interactable: ResourceId,
    pub physics_body: ExternHandle,
}

#[derive(Debug, Clone)]
pub struct UiElement {
    pub position: [f32; 4],
    pub width: f32,
    pub height: f32,
    pub flex_direction: FlexDirection,
    pub padding: [f32; 4],
    pub margin: [f32; 4],
    pub background_color: [f32; 4],
    pub border_color: [f32; 4],
    // intrusive links within one canvas tree
    pub parent: ResourceId,
    pub first_child: ResourceId,
    pub next_sibling: ResourceId,
}

impl Default for UiElement {
    fn default() -> Self {
        Self {
            position: [0.0; 4],
            width: 0.0,
            height: 0.0,
            flex_direction: FlexDirection::Column,
            padding: [0.0; 4],
            margin: [0.0; 4],
            background_color: [0.0; 4],
            border_color: [0.0; 4],
            parent: NIL_RESOURCE_ID,
            first_child: NIL_RESOURCE_ID,
            next_sibling: NIL_RESOURCE_ID,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UiButton {
    pub element: UiElement,
    pub label: String,
    pub interactable: ResourceId,
}

#[derive(Debug, Clone)]
pub struct UiText {
    pub element: UiElement,
    pub value: String,
    pub font_size: f32,
    pub color: [f32; 4],
}

#[derive(Debug, Clone)]
pub enum Resource {
    Node(Node),
    Scene(Scene),
    Mesh(Mesh),
    MeshPrimitive(MeshPrimitive),
    Accessor(Accessor),
    Buffer(Buffer),
    BufferView(BufferView),
    Material(Material),
    Texture(Texture),
    Light(Light),
    Collider(Collider),
    Interactable(Interactable),
    UiCanvas(UiCanvas),
    UiElement(UiElement),
    UiButton(UiButton),
    UiText(UiText),
}

impl Resource {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Resource::Node(_) => ResourceKind::Node,
            Resource::Scene(_) => ResourceKind::Scene,
            Resource::Mesh(_) => ResourceKind::Mesh,
            Resource::MeshPrimitive(_) => ResourceKind::MeshPrimitive,
            Resource::Accessor(_) => ResourceKind::Accessor,
            Resource::Buffer(_) => ResourceKind::Buffer,
            Resource::BufferView(_) => ResourceKind::BufferView,
            Resource::Material(_) => ResourceKind::Material,
            Resource::Texture(_) => ResourceKind::Texture,
            Resource::Light(_) => ResourceKind::Light,
            Resource::Collider(_) => ResourceKind::Collider,
            Resource::Interactable(_) => ResourceKind::Interactable,
            Resource::UiCanvas(_) => ResourceKind::UiCanvas,
            Resource::UiElement(_) => ResourceKind::UiElement,
            Resource::UiButton(_) => ResourceKind::UiButton,
            Resource::UiText(_) => ResourceKind::UiText,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Resource::Node(r) => r.name.as_deref(),
            Resource::Scene(r) => r.name.as_deref(),
            Resource::Mesh(r) => r.name.as_deref(),
            Resource::Buffer(r) => r.name.as_deref(),
            Resource::Material(r) => r.name.as_deref(),
            Resource::Texture(r) => r.name.as_deref(),
            Resource::Light(r) => r.name.as_deref(),
            _ => None,
        }
    }

    /// The element layout block shared by plain elements, buttons and text.
    pub fn ui_element(&self) -> Option<&UiElement> {
        match self {
            Resource::UiElement(e) => Some(e),
            Resource::UiButton(b) => Some(&b.element),
            Resource::UiText(t) => Some(&t.element),
            _ => None,
        }
    }

    pub fn ui_element_mut(&mut self) -> Option<&mut UiElement> {
        match self {
            Resource::UiElement(e) => Some(e),
            Resource::UiButton(b) => Some(&mut b.element),
            Resource::UiText(t) => Some(&mut t.element),
            _ => None,
        }
    }
}
