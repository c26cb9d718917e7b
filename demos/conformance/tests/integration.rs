//! Link-level checks on the symbols generated for this crate's own target.

use incbin::Embedded;
use incbin_conformance::{declared, embedded, LOREM_SOURCE};

fn binary() -> [(&'static str, Embedded); 4] {
    [
        ("Lorem", embedded::lorem()),
        ("Onebyte", embedded::onebyte()),
        ("Sevenbytes", embedded::sevenbytes()),
        ("Empty", embedded::empty()),
    ]
}

fn all() -> Vec<(&'static str, Embedded)> {
    let mut all = binary().to_vec();
    all.extend([
        ("CharLorem", embedded::char_lorem()),
        ("CharOnebyte", embedded::char_onebyte()),
        ("CharSevenbytes", embedded::char_sevenbytes()),
        ("TLorem", embedded::t_lorem()),
    ]);
    all
}

/// Alignment the build script should have picked for this target.
fn expected_alignment() -> usize {
    if cfg!(any(
        target_feature = "avx",
        target_feature = "avx2",
        target_feature = "avx512f"
    )) {
        32
    } else if cfg!(any(
        target_feature = "sse",
        target_feature = "sse2",
        target_feature = "neon",
        target_feature = "altivec",
        target_feature = "simd128"
    )) {
        16
    } else {
        std::mem::size_of::<usize>()
    }
}

#[test]
fn sizes_match_source_files() {
    assert_eq!(embedded::lorem().len(), 962);
    assert_eq!(embedded::onebyte().len(), 1);
    assert_eq!(embedded::sevenbytes().len(), 7);
    assert_eq!(embedded::empty().len(), 0);
    assert!(embedded::empty().is_empty());

    assert_eq!(embedded::char_lorem().len(), 962);
    assert_eq!(embedded::char_onebyte().len(), 1);
    assert_eq!(embedded::char_sevenbytes().len(), 7);

    assert_eq!(embedded::t_lorem().len(), 963);
}

#[test]
fn size_symbols_agree_with_addresses() {
    // SAFETY: read-only statics defined by the generated assembler.
    let sizes = unsafe {
        [
            embedded::gLoremSize,
            embedded::gOnebyteSize,
            embedded::gSevenbytesSize,
            embedded::gEmptySize,
            embedded::gTLoremSize,
        ]
    };
    assert_eq!(sizes, [962, 1, 7, 0, 963]);

    for (name, blob) in all() {
        let span = blob.end_ptr() as usize - blob.data_ptr() as usize;
        assert_eq!(span, blob.len(), "{name}: End - Data");
    }
}

#[test]
fn contents_match_source_files() {
    assert_eq!(embedded::lorem().as_bytes(), LOREM_SOURCE);
    assert_eq!(embedded::char_lorem().as_bytes(), LOREM_SOURCE);
    assert_eq!(embedded::onebyte().as_bytes(), b"1");
    assert_eq!(embedded::sevenbytes().as_bytes(), b"1234567");
    assert_eq!(&*embedded::char_sevenbytes(), b"1234567");
}

#[test]
fn text_payload_is_nul_terminated() {
    let text = embedded::t_lorem();
    assert!(text.is_text());
    assert!(!embedded::lorem().is_text());
    assert_eq!(text.as_bytes().last(), Some(&0));
    assert_eq!(&text.as_bytes()[..962], LOREM_SOURCE);
    assert_eq!(text.as_str().map(str::as_bytes), Some(LOREM_SOURCE));
    assert_eq!(text.as_c_str().map(|c| c.to_bytes()), Some(LOREM_SOURCE));
}

#[test]
fn data_is_aligned_for_the_target() {
    let expected = expected_alignment();
    for (name, blob) in all() {
        assert_eq!(blob.alignment(), expected, "{name}");
        assert!(blob.is_aligned(), "{name} at {:p}", blob.data_ptr());
        assert_eq!(blob.data_ptr() as usize % expected, 0, "{name}");
    }
}

#[test]
fn redeclared_symbols_resolve_to_the_same_data() {
    // SAFETY: only addresses are taken.
    let pairs = unsafe {
        [
            (
                core::ptr::addr_of!(embedded::gLoremData) as usize,
                core::ptr::addr_of!(declared::gLoremData) as usize,
            ),
            (
                core::ptr::addr_of!(embedded::gLoremEnd) as usize,
                core::ptr::addr_of!(declared::gLoremEnd) as usize,
            ),
            (
                core::ptr::addr_of!(embedded::gTLoremData) as usize,
                core::ptr::addr_of!(declared::gTLoremData) as usize,
            ),
        ]
    };
    for (defined, redeclared) in pairs {
        assert_eq!(defined, redeclared);
    }
    // SAFETY: read-only static.
    assert_eq!(unsafe { declared::gSevenbytesSize }, 7);
}

#[test]
fn resources_do_not_overlap() {
    let spans: Vec<_> = all()
        .into_iter()
        .filter(|(_, blob)| !blob.is_empty())
        .map(|(name, blob)| (name, blob.data_ptr() as usize, blob.end_ptr() as usize))
        .collect();
    for (i, (a, a_start, a_end)) in spans.iter().enumerate() {
        for (b, b_start, b_end) in &spans[i + 1..] {
            assert!(
                a_end <= b_start || b_end <= a_start,
                "{a} [{a_start:#x}, {a_end:#x}) overlaps {b} [{b_start:#x}, {b_end:#x})"
            );
        }
    }
}

#[test]
fn same_file_embedded_twice_is_two_copies() {
    let (binary, chars) = (embedded::lorem(), embedded::char_lorem());
    assert_ne!(binary.data_ptr(), chars.data_ptr());
    assert_eq!(binary, chars);
}
