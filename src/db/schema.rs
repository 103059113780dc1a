table! {
    signatures (id) {
        id -> Nullable<Integer>,
        page_id -> BigInt,
        revision_id -> BigInt,
        signer_id -> BigInt,
        timestamp -> Timestamp,
        content_hash -> Text,
        is_valid -> Bool,
        remarks -> Nullable<Text>,
    }
}
