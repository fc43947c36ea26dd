//! UI canvas, element, button and text parameter blocks.
//!
//! Buttons and text reuse the element field group, then append their own
//! fields, then the common extensions/extras tail.

use arbor_core::cursor::MemCursor;
use arbor_core::error::HostError;
use arbor_core::resource::UiElement;
use arbor_core::types::{FlexDirection, ResourceId};

use super::extensions::decode_extension_block;
use super::{enum_u32, Scope};

pub struct UiCanvasProps {
    pub root: ResourceId,
    pub size: [f32; 2],
    pub width: f32,
    pub height: f32,
}

pub struct UiButtonProps {
    pub element: UiElement,
    pub label: String,
}

pub struct UiTextProps {
    pub element: UiElement,
    pub value: String,
    pub font_size: f32,
    pub color: [f32; 4],
}

/// Canvas block layout:
/// f32x2 size, f32 width, f32 height, u32 root, extensions, extras.
pub fn decode_ui_canvas(
    cur: &mut MemCursor<'_>,
    scope: &Scope<'_>,
) -> Result<UiCanvasProps, HostError> {
    let size = cur.read_f32_array::<2>()?;
    let width = cur.read_f32()?;
    let height = cur.read_f32()?;
    let root = scope.optional_ui_handle(cur.read_u32()?)?;
    decode_extension_block(cur)?;

    Ok(UiCanvasProps {
        root,
        size,
        width,
        height,
    })
}

/// The field group shared by element, button and text blocks:
/// f32x4 position, f32 width, f32 height, u32 flexDirection,
/// f32x4 padding, f32x4 margin, f32x4 backgroundColor, f32x4 borderColor.
fn decode_element_fields(cur: &mut MemCursor<'_>) -> Result<UiElement, HostError> {
    let position = cur.read_f32_array::<4>()?;
    let width = cur.read_f32()?;
    let height = cur.read_f32()?;
    let flex_direction: FlexDirection = enum_u32("flex direction", cur.read_u32()?)?;
    let padding = cur.read_f32_array::<4>()?;
    let margin = cur.read_f32_array::<4>()?;
    let background_color = cur.read_f32_array::<4>()?;
    let border_color = cur.read_f32_array::<4>()?;

    Ok(UiElement {
        position,
        width,
        height,
        flex_direction,
        padding,
        margin,
        background_color,
        border_color,
        ..UiElement::default()
    })
}

/// Element block layout: element fields, extensions, extras.
pub fn decode_ui_element(cur: &mut MemCursor<'_>) -> Result<UiElement, HostError> {
    let element = decode_element_fields(cur)?;
    decode_extension_block(cur)?;
    Ok(element)
}

/// Button block layout: element fields, u32 labelPtr, u32 labelLen,
/// extensions, extras.
pub fn decode_ui_button(cur: &mut MemCursor<'_>) -> Result<UiButtonProps, HostError> {
    let element = decode_element_fields(cur)?;
    let label_ptr = cur.read_u32()?;
    let label_len = cur.read_u32()?;
    let label = cur.read_utf8(label_ptr as usize, label_len as usize)?;
    decode_extension_block(cur)?;
    Ok(UiButtonProps { element, label })
}

/// Text block layout: element fields, u32 valuePtr, u32 valueLen,
/// f32 fontSize, f32x4 color, extensions, extras.
pub fn decode_ui_text(cur: &mut MemCursor<'_>) -> Result<UiTextProps, HostError> {
    let element = decode_element_fields(cur)?;
    let value_ptr = cur.read_u32()?;
    let value_len = cur.read_u32()?;
    let value = cur.read_utf8(value_ptr as usize, value_len as usize)?;
    let font_size = cur.read_f32()?;
    let color = cur.read_f32_array::<4>()?;
    decode_extension_block(cur)?;
    Ok(UiTextProps {
        element,
        value,
        font_size,
        color,
    })
}
