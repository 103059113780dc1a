// Copyright (c) 2018-2022 The MobileCoin Foundation

//! Database models.

mod signature_record;

pub use signature_record::SignatureRecord;
