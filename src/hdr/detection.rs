use super::types::HdrSignal;
use crate::media::StreamInfo;
use tracing::debug;

/// PQ (HDR10) and HLG.
pub const HDR_TRANSFERS: &[&str] = &["smpte2084", "arib-std-b67"];
pub const HDR_PRIMARIES: &str = "bt2020";
/// Case-sensitive substrings of ffprobe `side_data_type` labels.
pub const HDR_SIDE_DATA_MARKERS: &[&str] = &["HDR", "Mastering display", "Content light level"];

/// Returns true when the stream carries any HDR indicator.
pub fn classify_hdr(stream: &StreamInfo) -> bool {
    detect_hdr_signal(stream).is_some()
}

/// Finds the first HDR indicator on the stream.
///
/// Checks run in a fixed order and the first hit wins: transfer
/// characteristics, then primaries, then side data in probe order. Missing
/// fields never match.
pub fn detect_hdr_signal(stream: &StreamInfo) -> Option<HdrSignal> {
    let transfer = stream.color_transfer.as_deref().unwrap_or_default();
    if HDR_TRANSFERS.contains(&transfer) {
        debug!("HDR transfer characteristics on {} stream: {}", stream.codec_name, transfer);
        return Some(HdrSignal::Transfer(transfer.to_string()));
    }

    let primaries = stream.color_primaries.as_deref().unwrap_or_default();
    if primaries == HDR_PRIMARIES {
        debug!("HDR primaries on {} stream: {}", stream.codec_name, primaries);
        return Some(HdrSignal::Primaries(primaries.to_string()));
    }

    let label = stream
        .side_data
        .iter()
        .filter_map(|entry| entry.type_label.as_deref())
        .find(|label| {
            HDR_SIDE_DATA_MARKERS
                .iter()
                .any(|marker| label.contains(marker))
        })?;

    debug!("HDR side data on {} stream: {}", stream.codec_name, label);
    Some(HdrSignal::SideData(label.to_string()))
}
