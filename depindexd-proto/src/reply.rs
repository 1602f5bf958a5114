/// The three and only reply codes the wire protocol ever emits.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Reply {
    Ok,
    Fail,
    Error,
}

impl Reply {
    pub fn as_bytes(self) -> &'static [u8] {
        match self {
            Reply::Ok => b"OK\n",
            Reply::Fail => b"FAIL\n",
            Reply::Error => b"ERROR\n",
        }
    }
}
