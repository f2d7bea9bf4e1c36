//! The merge engine: folds a capture into a product record.
//!
//! Captures are partial. A later capture that omits a field must not erase
//! what an earlier one found, so each field resolves to the first non-empty
//! value of (incoming, existing). Status is recomputed from the merged
//! fields every time and is never carried over.

use jiff::{SignedDuration, Timestamp};

use crate::model::{Asin, Capture, DealStatus, ProductRecord};

/// Merge a capture into the existing record for its identifier, if any.
///
/// Returns a fresh record; `existing` is never modified.
pub fn merge(existing: Option<&ProductRecord>, capture: &Capture) -> ProductRecord {
    merge_at(existing, capture, Timestamp::now())
}

/// [`merge`] with an explicit clock reading.
///
/// The result's `last_updated` is `now`, or one nanosecond past the
/// existing record's timestamp when the clock has not moved forward.
pub fn merge_at(
    existing: Option<&ProductRecord>,
    capture: &Capture,
    now: Timestamp,
) -> ProductRecord {
    let title = resolve(
        capture.title.as_ref(),
        existing.and_then(|e| e.title.as_ref()),
    );
    let price = resolve(
        capture.price.as_ref(),
        existing.and_then(|e| e.price.as_ref()),
    );
    let code = resolve(capture.code.as_ref(), existing.and_then(|e| e.code.as_ref()));
    let discount = resolve(
        capture.discount.as_ref(),
        existing.and_then(|e| e.discount.as_ref()),
    );

    let last_updated = match existing {
        Some(e) if now <= e.last_updated => e
            .last_updated
            .checked_add(SignedDuration::from_nanos(1))
            .unwrap_or(e.last_updated),
        _ => now,
    };

    let status = derive_status(
        title.as_deref(),
        price.as_deref(),
        code.as_deref(),
        discount.as_deref(),
    );

    ProductRecord {
        asin: capture.asin.clone(),
        title,
        price,
        code,
        discount,
        image_url: image_reference(&capture.asin),
        last_updated,
        status,
    }
}

/// Ready once a product has a name, a price, and a code or a discount.
pub fn derive_status(
    title: Option<&str>,
    price: Option<&str>,
    code: Option<&str>,
    discount: Option<&str>,
) -> DealStatus {
    let has = |field: Option<&str>| field.is_some_and(|v| !v.trim().is_empty());
    if has(title) && has(price) && (has(code) || has(discount)) {
        DealStatus::Ready
    } else {
        DealStatus::Incomplete
    }
}

/// Placeholder image locator for a product. Pure in the identifier, which is
/// percent-encoded into the path.
pub fn image_reference(asin: &Asin) -> String {
    format!(
        "https://picsum.photos/seed/{}/400/400",
        urlencoding::encode(asin.as_str())
    )
}

fn resolve(incoming: Option<&String>, existing: Option<&String>) -> Option<String> {
    incoming
        .filter(|v| !v.trim().is_empty())
        .or(existing.filter(|v| !v.trim().is_empty()))
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture(asin: &str) -> Capture {
        Capture::new(Asin::parse(asin).unwrap())
    }

    fn ts(seconds: i64) -> Timestamp {
        Timestamp::new(seconds, 0).unwrap()
    }

    #[test]
    fn identifier_only_capture_is_incomplete() {
        let record = merge(None, &capture("A1"));

        assert_eq!(record.asin.as_str(), "A1");
        assert_eq!(record.status, DealStatus::Incomplete);
        assert!(record.title.is_none());
        assert!(record.price.is_none());
    }

    #[test]
    fn later_capture_completes_record() {
        let mut first = capture("A1");
        first.price = Some("19.99".into());
        let record = merge_at(None, &first, ts(1_000));
        assert_eq!(record.status, DealStatus::Incomplete);

        let mut second = capture("A1");
        second.title = Some("Widget".into());
        second.code = Some("SAVE10".into());
        let merged = merge_at(Some(&record), &second, ts(2_000));

        assert_eq!(merged.title.as_deref(), Some("Widget"));
        assert_eq!(merged.price.as_deref(), Some("19.99"));
        assert_eq!(merged.code.as_deref(), Some("SAVE10"));
        assert_eq!(merged.status, DealStatus::Ready);
    }

    #[test]
    fn absent_fields_retain_existing_values() {
        let mut full = capture("A1");
        full.title = Some("Widget".into());
        full.price = Some("19.99".into());
        full.code = Some("SAVE10".into());
        full.discount = Some("15".into());
        let record = merge_at(None, &full, ts(1_000));

        // Each field omitted in turn; the others overwrite.
        for field in 0..4 {
            let mut partial = capture("A1");
            partial.title = (field != 0).then(|| "Gadget".into());
            partial.price = (field != 1).then(|| "9.99".into());
            partial.code = (field != 2).then(|| "NEW5".into());
            partial.discount = (field != 3).then(|| "5".into());
            let merged = merge_at(Some(&record), &partial, ts(2_000));

            match field {
                0 => assert_eq!(merged.title, record.title),
                1 => assert_eq!(merged.price, record.price),
                2 => assert_eq!(merged.code, record.code),
                _ => assert_eq!(merged.discount, record.discount),
            }
        }
    }

    #[test]
    fn discount_alone_satisfies_promotion_requirement() {
        let mut c = capture("A1");
        c.title = Some("Widget".into());
        c.price = Some("40.00".into());
        c.discount = Some("25".into());

        assert_eq!(merge(None, &c).status, DealStatus::Ready);
    }

    #[test]
    fn title_and_price_without_promotion_is_incomplete() {
        let mut c = capture("A1");
        c.title = Some("Widget".into());
        c.price = Some("40.00".into());

        assert_eq!(merge(None, &c).status, DealStatus::Incomplete);
    }

    #[test]
    fn merging_same_capture_twice_is_idempotent() {
        let mut c = capture("A1");
        c.title = Some("Widget".into());
        c.price = Some("19.99".into());
        c.code = Some("SAVE10".into());

        let once = merge(None, &c);
        let twice = merge(Some(&once), &c);

        assert!(twice.last_updated >= once.last_updated);
        assert_eq!(
            ProductRecord {
                last_updated: once.last_updated,
                ..twice
            },
            once
        );
    }

    #[test]
    fn timestamp_strictly_increases_when_clock_stalls() {
        let c = capture("A1");
        let record = merge_at(None, &c, ts(5_000));
        let again = merge_at(Some(&record), &c, ts(5_000));
        let earlier_clock = merge_at(Some(&again), &c, ts(4_000));

        assert!(again.last_updated > record.last_updated);
        assert!(earlier_clock.last_updated > again.last_updated);
    }

    #[test]
    fn merge_does_not_touch_existing_record() {
        let mut c = capture("A1");
        c.title = Some("Widget".into());
        let record = merge_at(None, &c, ts(1_000));
        let snapshot = record.clone();

        let mut update = capture("A1");
        update.title = Some("Gadget".into());
        let _ = merge_at(Some(&record), &update, ts(2_000));

        assert_eq!(record, snapshot);
    }

    #[test]
    fn image_reference_is_stable_per_identifier() {
        let a = Asin::parse("B0ABC").unwrap();
        assert_eq!(image_reference(&a), image_reference(&a));
        assert_eq!(
            image_reference(&a),
            "https://picsum.photos/seed/B0ABC/400/400"
        );
        assert_ne!(
            image_reference(&a),
            image_reference(&Asin::parse("B0XYZ").unwrap())
        );
    }

    #[test]
    fn image_reference_encodes_the_identifier() {
        let odd = Asin::parse("B0/AB C").unwrap();
        assert_eq!(
            image_reference(&odd),
            "https://picsum.photos/seed/B0%2FAB%20C/400/400"
        );
    }

    #[test]
    fn whitespace_values_count_as_absent() {
        assert_eq!(
            derive_status(Some("Widget"), Some("  "), Some("CODE"), None),
            DealStatus::Incomplete
        );
    }
}
