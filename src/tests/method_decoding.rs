#[cfg(test)]
mod tests {
    use crate::dex::opcodes::lookup;
    use crate::listing::{listing, ListingOptions, RegMapper};
    use crate::{
        decode_method, decode_with_placeholders, ErrorKind, MethodCode, Operand, PayloadKind, PoolTables,
        ReferenceType,
    };

    fn hello_pool() -> PoolTables {
        let mut pool = PoolTables::new();
        pool.push_string("Hello");
        pool.push_string("World");
        pool.push_type("Ljava/io/PrintStream;");
        pool.push_field("Ljava/lang/System;->out:Ljava/io/PrintStream;");
        pool.push_method("Ljava/io/PrintStream;->println(Ljava/lang/String;)V");
        pool
    }

    // sget-object v0, System.out
    // const-string v1, "Hello"
    // invoke-virtual {v0, v1}, println
    // const/4 v0, #0
    // if-eqz v0, +4
    // const-string/jumbo v1, "World"
    // return-void
    const HELLO: [u8; 28] = [
        0x62, 0x00, 0x00, 0x00,
        0x1a, 0x01, 0x00, 0x00,
        0x6e, 0x20, 0x00, 0x00, 0x10, 0x00,
        0x12, 0x00,
        0x38, 0x00, 0x04, 0x00,
        0x1b, 0x01, 0x01, 0x00, 0x00, 0x00,
        0x0e, 0x00,
    ];

    #[test]
    fn decode_hello_method() {
        let pool = hello_pool();
        let d = decode_method(&HELLO, 0x200, &pool).unwrap();
        let text: Vec<String> = d.iter().map(|i| i.to_string()).collect();
        assert_eq!(
            text,
            vec![
                "sget-object v0, Ljava/lang/System;->out:Ljava/io/PrintStream;",
                "const-string v1, Hello",
                "invoke-virtual v0, v1, Ljava/io/PrintStream;->println(Ljava/lang/String;)V",
                "const/4 v0, 0",
                "if-eqz v0, 0204",
                "const-string/jumbo v1, World",
                "return-void",
            ]
        );
        let offsets: Vec<usize> = d.iter().map(|i| i.offset).collect();
        assert_eq!(offsets, vec![0, 4, 8, 14, 16, 20, 26]);
        assert_eq!(d.instructions()[4].operands[1].target(), Some(0x204));
    }

    #[test]
    fn extract_strings_and_references() {
        let pool = hello_pool();
        let d = decode_method(&HELLO, 0, &pool).unwrap();
        assert_eq!(d.string_constants(), vec!["Hello", "World"]);
        assert_eq!(d.references(ReferenceType::String).collect::<Vec<_>>(), vec!["Hello", "World"]);
        assert_eq!(
            d.references(ReferenceType::Method).collect::<Vec<_>>(),
            vec!["Ljava/io/PrintStream;->println(Ljava/lang/String;)V"]
        );
        assert_eq!(d.references(ReferenceType::Type).count(), 0);
    }

    #[test]
    fn method_code_bundles_inputs() {
        let pool = hello_pool();
        let code = MethodCode::new(&HELLO, 0x200);
        assert_eq!(code.decode(&pool).unwrap(), decode_method(&HELLO, 0x200, &pool).unwrap());
    }

    #[test]
    fn decoding_is_repeatable() {
        let pool = hello_pool();
        let a = decode_method(&HELLO, 0x40, &pool).unwrap();
        let b = decode_method(&HELLO, 0x40, &pool).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.records(), b.records());
    }

    #[test]
    fn decode_from_many_threads() {
        let pool = hello_pool();
        let expected = decode_method(&HELLO, 0x80, &pool).unwrap();
        std::thread::scope(|s| {
            let handles: Vec<_> = (0..4).map(|_| s.spawn(|| decode_method(&HELLO, 0x80, &pool).unwrap())).collect();
            for h in handles {
                assert_eq!(h.join().unwrap(), expected);
            }
        });
    }

    #[test]
    fn unresolved_index_aborts_method() {
        let mut pool = hello_pool();
        pool.strings.truncate(1);
        let e = decode_method(&HELLO, 0, &pool).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::UnresolvedPoolIndex);
        assert_eq!(e.to_string(), "string index 1 out of range for const-string/jumbo at 0x14");

        let e = decode_method(&HELLO, 0, &PoolTables::new()).unwrap_err();
        assert_eq!(e.to_string(), "field index 0 out of range for sget-object at 0x0");
    }

    #[test]
    fn packed_switch_payload_is_skipped() {
        let code = [
            0x2b, 0x00, 0x04, 0x00, 0x00, 0x00, // packed-switch v0, +4
            0x0e, 0x00, // return-void
            0x00, 0x01, 0x02, 0x00, // packed-switch-payload, 2 entries
            0x0a, 0x00, 0x00, 0x00, // first key
            0x03, 0x00, 0x00, 0x00, 0x04, 0x00, 0x00, 0x00, // targets
            0x0e, 0x00, // return-void
        ];
        let d = decode_with_placeholders(&code, 0).unwrap();
        let offsets: Vec<usize> = d.iter().map(|i| i.offset).collect();
        assert_eq!(offsets, vec![0, 6, 24]);
        assert_eq!(d.instructions()[0].to_string(), "packed-switch v0, 0004");
        assert_eq!(d.payload_at(8), Some(PayloadKind::PackedSwitch));
        assert_eq!(d.payload_at(23), Some(PayloadKind::PackedSwitch));
        assert_eq!(d.payload_at(24), None);
        assert_eq!(d.payloads().collect::<Vec<_>>(), vec![(8..24, PayloadKind::PackedSwitch)]);
    }

    #[test]
    fn sparse_switch_and_array_payloads() {
        let code = [
            0x00, 0x02, 0x01, 0x00, 0x05, 0x00, 0x00, 0x00, 0x08, 0x00, 0x00, 0x00, // sparse, 1 entry
            0x00, 0x03, 0x02, 0x00, 0x03, 0x00, 0x00, 0x00, 0x01, 0x00, 0x02, 0x00, 0x03, 0x00, // array, w2 n3
            0x0e, 0x00,
        ];
        let d = decode_with_placeholders(&code, 0).unwrap();
        assert_eq!(d.len(), 1);
        assert_eq!(d.instructions()[0].offset, 26);
        assert_eq!(
            d.payloads().collect::<Vec<_>>(),
            vec![(0..12, PayloadKind::SparseSwitch), (12..26, PayloadKind::ArrayData)]
        );
    }

    #[test]
    fn lone_array_payload_yields_nothing() {
        let code = [0x00, 0x03, 0x02, 0x00, 0x03, 0x00, 0x00, 0x00, 0x01, 0x00, 0x02, 0x00, 0x03, 0x00];
        let d = decode_with_placeholders(&code, 0).unwrap();
        assert!(d.is_empty());
        assert_eq!(d.payload_at(13), Some(PayloadKind::ArrayData));
    }

    #[test]
    fn truncated_payload_aborts_method() {
        let code = [0x0e, 0x00, 0x00, 0x01, 0x05, 0x00];
        let e = decode_with_placeholders(&code, 0).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::TruncatedBuffer);
        assert_eq!(e.to_string(), "packed-switch-payload needs 28 bytes, 4 left for payload at 0x2");
    }

    #[test]
    fn short_const_wide_is_truncation() {
        let code = [0x18, 0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06];
        let e = decode_with_placeholders(&code, 0).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::TruncatedBuffer);
        assert_eq!(e.message(), "Truncated const-wide at 0x0: need 10 bytes, have 8");

        let mut full = code.to_vec();
        full.extend_from_slice(&[0x07, 0x08]);
        let d = decode_with_placeholders(&full, 0).unwrap();
        assert_eq!(d.instructions()[0].operands[1], Operand::Literal(0x0807060504030201));
    }

    #[test]
    fn invoke_argument_counts() {
        let regs = ["v1", "v2", "v3", "v4", "v5"];
        for count in 0..=5u8 {
            let code = [0x6e, (count << 4) | 0x05, 0x07, 0x00, 0x21, 0x43];
            let d = decode_with_placeholders(&code, 0).unwrap();
            let mut expected: Vec<String> = regs[..count as usize].iter().map(|r| r.to_string()).collect();
            expected.push("method@7".to_string());
            assert_eq!(d.instructions()[0].operand_text(), expected);
        }
    }

    #[test]
    fn range_invoke_consumes_three_units() {
        let code = [0x74, 0x03, 0x01, 0x00, 0x04, 0x00, 0x0e, 0x00];
        let d = decode_with_placeholders(&code, 0).unwrap();
        assert_eq!(d.len(), 2);
        assert_eq!(d.instructions()[0].opcode, lookup(0x74));
        assert!(d.instructions()[0].operands.is_empty());
        assert_eq!(d.instructions()[1].offset, 6);
    }

    #[test]
    fn unused_opcodes_decode_as_one_unit() {
        let d = decode_with_placeholders(&[0x3e, 0x12, 0x0e, 0x00], 0).unwrap();
        assert_eq!(d.len(), 2);
        assert_eq!(d.instructions()[0].mnemonic(), "unused");
        assert!(d.instructions()[0].operands.is_empty());
    }

    #[test]
    fn listing_with_parameter_names() {
        let pool = hello_pool();
        let d = decode_method(&HELLO, 0, &pool).unwrap();
        let opts = ListingOptions { registers: Some(RegMapper::new(2, 1)), separate_blocks: true, show_payloads: false };
        let lines = listing(&HELLO, 0x1000, &d, &opts);
        assert_eq!(lines.len(), 8);
        assert_eq!(
            lines[2],
            format!(
                "00001008: {:<36}|0004: invoke-virtual v0, p0, Ljava/io/PrintStream;->println(Ljava/lang/String;)V",
                "6e20 0000 1000"
            )
        );
        assert!(lines[6].ends_with("|000d: return-void"));
        assert_eq!(lines[7], "");
    }
}
