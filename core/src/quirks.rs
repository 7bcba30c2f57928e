/// Behaviours that differ between interpreters and that ROMs may depend on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Quirks {
    /// `SKP`/`SKNP` release the key they inspect, so a held key is only seen once.
    pub consume_keys: bool,
}

impl Default for Quirks {
    fn default() -> Self {
        Quirks { consume_keys: true }
    }
}
