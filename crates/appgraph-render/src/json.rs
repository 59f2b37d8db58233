use serde::Serialize;

/// Serializes any layout output (`LayoutResult`, `RenderGraph`, ...) for stdout or a file.
pub fn to_json_string<T: Serialize>(value: &T, pretty: bool) -> crate::Result<String> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(out)
}
