// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Encode → PNG → decode through the `image` adapter.

#![cfg(feature = "image-io")]

use pixelveil_core::{
    capacity_report, decode, decode_image, encode, encode_png, DecodeRequest, EncodeRequest, PasswordChoice,
    PixelBuffer, SecretPayload,
};

fn cover_png(width: u32, height: u32) -> Vec<u8> {
    let data = (0..width as usize * height as usize * 4)
        .map(|i| ((i * 31 + i / 7) % 256) as u8)
        .collect();
    encode_png(&PixelBuffer::from_rgba(width, height, data).unwrap()).unwrap()
}

#[test]
fn survives_png_container() {
    let carrier = decode_image(&cover_png(120, 80)).unwrap();
    let out = encode(EncodeRequest {
        carrier,
        payload: SecretPayload::Text("through a png".into()),
        password: PasswordChoice::Generate,
        identifier: None,
    })
    .unwrap();

    let png = encode_png(&out.carrier).unwrap();
    let reloaded = decode_image(&png).unwrap();
    assert_eq!(reloaded, out.carrier);

    let decoded = decode(&DecodeRequest { carrier: &reloaded, identifier: &out.identifier, password: &out.password })
        .unwrap();
    assert_eq!(decoded, SecretPayload::Text("through a png".into()));
}

#[test]
fn capacity_report_for_decoded_cover() {
    let carrier = decode_image(&cover_png(100, 100)).unwrap();
    let report = capacity_report(
        &carrier,
        &SecretPayload::Text("hello".into()),
        &mut pixelveil_core::stego::random::os_rng(),
    )
    .unwrap();
    assert_eq!(report.usable_bits, 9_968);
    assert_eq!(report.usable_bytes, 1_246);
    assert!(!report.over_capacity);
}
