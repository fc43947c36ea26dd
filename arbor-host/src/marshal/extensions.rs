//! String-keyed extension dispatch.
//!
//! Each parameter block ends with `(items_ptr, count)` followed by the
//! 8-byte extras placeholder. Every item is `(name_ptr, name_len,
//! value_offset)`. Known extension names decode their value; unknown names
//! are skipped so newer guests keep working against older hosts.

use std::collections::HashMap;

use arbor_core::cursor::MemCursor;
use arbor_core::error::HostError;

const ITEM_STRIDE: u32 = 12;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExtensionValue {
    /// `KHR_materials_emissive_strength`: scalar multiplier on the emissive
    /// factor.
    EmissiveStrength(f32),
    /// `OMI_collider_extent`: explicit half-extents overriding the collider
    /// size field.
    ColliderExtent([f32; 3]),
}

type Decoder = fn(&mut MemCursor<'_>, u32) -> Result<ExtensionValue, HostError>;

pub struct ExtensionRegistry {
    decoders: HashMap<&'static str, Decoder>,
}

impl Default for ExtensionRegistry {
    fn default() -> Self {
        let mut decoders: HashMap<&'static str, Decoder> = HashMap::new();
        decoders.insert("KHR_materials_emissive_strength", decode_emissive_strength);
        decoders.insert("OMI_collider_extent", decode_collider_extent);
        Self { decoders }
    }
}

impl ExtensionRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

fn decode_emissive_strength(
    cur: &mut MemCursor<'_>,
    value_offset: u32,
) -> Result<ExtensionValue, HostError> {
    cur.move_to(value_offset as usize)?;
    Ok(ExtensionValue::EmissiveStrength(cur.read_f32()?))
}

fn decode_collider_extent(
    cur: &mut MemCursor<'_>,
    value_offset: u32,
) -> Result<ExtensionValue, HostError> {
    cur.move_to(value_offset as usize)?;
    Ok(ExtensionValue::ColliderExtent(cur.read_f32_array::<3>()?))
}

/// Consume the `(items_ptr, count)` pair and the extras placeholder, then
/// walk the item table. The cursor ends up wherever the last decoder left
/// it; callers read extensions last.
pub fn decode_extension_block(
    cur: &mut MemCursor<'_>,
) -> Result<Vec<ExtensionValue>, HostError> {
    let items_ptr = cur.read_u32()?;
    let count = cur.read_u32()?;
    cur.skip(8)?; // extras: always present, currently unparsed

    if count == 0 {
        return Ok(Vec::new());
    }
    // reject a lying count before iterating
    let table_len = count
        .checked_mul(ITEM_STRIDE)
        .and_then(|len| items_ptr.checked_add(len))
        .ok_or_else(|| HostError::decode("extension table length overflows"))?;
    cur.move_to(table_len as usize)?;

    let registry = ExtensionRegistry::new();
    let mut out = Vec::new();
    for i in 0..count {
        cur.move_to((items_ptr + i * ITEM_STRIDE) as usize)?;
        let name_ptr = cur.read_u32()?;
        let name_len = cur.read_u32()?;
        let value_offset = cur.read_u32()?;
        let name = cur.read_utf8(name_ptr as usize, name_len as usize)?;
        match registry.decoders.get(name.as_str()) {
            Some(decoder) => out.push(decoder(cur, value_offset)?),
            None => log::debug!("ignoring unknown extension {name:?}"),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn put_u32(buf: &mut [u8], at: usize, v: u32) {
        buf[at..at + 4].copy_from_slice(&v.to_le_bytes());
    }

    #[test]
    fn unknown_extensions_are_skipped_known_ones_decode() {
        let mut buf = vec![0u8; 256];
        // block tail at 0: items_ptr=16, count=2, extras
        put_u32(&mut buf, 0, 16);
        put_u32(&mut buf, 4, 2);
        // item 0 at 16: unknown name at 64
        put_u32(&mut buf, 16, 64);
        put_u32(&mut buf, 20, 7);
        put_u32(&mut buf, 24, 0);
        buf[64..71].copy_from_slice(b"MX_haze");
        // item 1 at 28: emissive strength, value at 128
        let name = b"KHR_materials_emissive_strength";
        put_u32(&mut buf, 28, 80);
        put_u32(&mut buf, 32, name.len() as u32);
        put_u32(&mut buf, 36, 128);
        buf[80..80 + name.len()].copy_from_slice(name);
        put_u32(&mut buf, 128, 2.5f32.to_bits());

        let mut cur = MemCursor::new(&mut buf);
        let values = decode_extension_block(&mut cur).unwrap();
        assert_eq!(values, vec![ExtensionValue::EmissiveStrength(2.5)]);
    }

    #[test]
    fn truncated_item_table_is_an_error() {
        let mut buf = vec![0u8; 32];
        put_u32(&mut buf, 0, 24); // items_ptr
        put_u32(&mut buf, 4, 4); // count: 4 * 12 bytes does not fit
        let mut cur = MemCursor::new(&mut buf);
        assert!(decode_extension_block(&mut cur).is_err());
    }
}
