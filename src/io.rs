use std::io::Read;

/// Reads a fixed number of bytes.
pub(crate) fn read_array<const N: usize, R: Read>(r: &mut R) -> std::io::Result<[u8; N]> {
    let mut buf = [0u8; N];
    r.read_exact(&mut buf)?;
    Ok(buf)
}

pub(crate) fn read_u8<R: Read>(r: &mut R) -> std::io::Result<u8> {
    Ok(read_array::<1, _>(r)?[0])
}

/// Reads a u16 in little endian.
pub(crate) fn read_u16_le<R: Read>(r: &mut R) -> std::io::Result<u16> {
    Ok(u16::from_le_bytes(read_array(r)?))
}

/// Reads a u32 in little endian.
pub(crate) fn read_u32_le<R: Read>(r: &mut R) -> std::io::Result<u32> {
    Ok(u32::from_le_bytes(read_array(r)?))
}

/// Reads a little endian u32 at `pos` of a slice, `None` when out of range.
pub(crate) fn u32_at(buf: &[u8], pos: usize) -> Option<u32> {
    let end = pos.checked_add(4)?;
    let bytes = buf.get(pos..end)?;
    Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

/// Same as [`u32_at`] but signed.
pub(crate) fn i32_at(buf: &[u8], pos: usize) -> Option<i32> {
    u32_at(buf, pos).map(|v| v as i32)
}
