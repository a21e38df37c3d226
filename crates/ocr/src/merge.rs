use cardscan_core::{ContactRecord, SideRecord};
use chrono::{DateTime, SecondsFormat, Utc};

/// Fixed separator for the multi-value contact fields.
const LIST_SEPARATOR: &str = ", ";
/// Fixed separator for free-text additional info.
const INFO_SEPARATOR: &str = " | ";

/// Combine the front and back face records into the final contact record,
/// stamped with the current time.
pub fn merge(front: &SideRecord, back: &SideRecord) -> ContactRecord {
    merge_at(front, back, Utc::now())
}

/// Like [`merge`] but with an explicit timestamp. The merge itself is a pure
/// function of its inputs: front's value wins per field when non-empty, the
/// back fills gaps, additional info is concatenated from both sides.
pub fn merge_at(
    front: &SideRecord,
    back: &SideRecord,
    scanned_at: DateTime<Utc>,
) -> ContactRecord {
    let name = pick(&front.name, &back.name);
    let info = [
        front.additional_info.join(INFO_SEPARATOR),
        back.additional_info.join(INFO_SEPARATOR),
    ]
    .into_iter()
    .filter(|s| !s.is_empty())
    .collect::<Vec<_>>()
    .join(INFO_SEPARATOR);

    ContactRecord {
        name: if name.is_empty() { "Unknown".to_string() } else { name.to_string() },
        company: pick(&front.company, &back.company).to_string(),
        position: pick(&front.position, &back.position).to_string(),
        email: pick_list(&front.emails, &back.emails),
        phone: pick_list(&front.phones, &back.phones),
        website: pick_list(&front.websites, &back.websites),
        address: pick_list(&front.addresses, &back.addresses),
        additional_info: info,
        scanned_at: scanned_at.to_rfc3339_opts(SecondsFormat::Millis, true),
    }
}

fn pick<'a>(front: &'a str, back: &'a str) -> &'a str {
    if front.is_empty() { back } else { front }
}

fn pick_list(front: &[String], back: &[String]) -> String {
    let side = if front.is_empty() { back } else { front };
    side.join(LIST_SEPARATOR)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
