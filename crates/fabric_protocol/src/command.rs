//! The command-plane vocabulary.
//!
//! Commands travel as bare UTF-8 bytes, not JSON — the string literals
//! below are part of the wire contract and must stay bit-exact across
//! implementations for interop.

/// A typed discriminator drawn from a closed set. Unknown wire values decode
/// to `Unknown` so callers can silently ignore them (forward-compatibility)
/// rather than failing to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    KillSink,
    KillWorker,
    Unknown(String),
}

impl Command {
    pub const KILL_SINK_WIRE: &'static str = "CLUSTER_SINK_KILL";
    pub const KILL_WORKER_WIRE: &'static str = "CLUSTER_WORKER_KILL";

    pub fn encode(&self) -> Vec<u8> {
        match self {
            Command::KillSink => Self::KILL_SINK_WIRE.as_bytes().to_vec(),
            Command::KillWorker => Self::KILL_WORKER_WIRE.as_bytes().to_vec(),
            Command::Unknown(raw) => raw.as_bytes().to_vec(),
        }
    }

    pub fn decode(bytes: &[u8]) -> Command {
        match std::str::from_utf8(bytes) {
            Ok(Self::KILL_SINK_WIRE) => Command::KillSink,
            Ok(Self::KILL_WORKER_WIRE) => Command::KillWorker,
            Ok(other) => Command::Unknown(other.to_string()),
            Err(_) => Command::Unknown(String::from_utf8_lossy(bytes).into_owned()),
        }
    }

    pub fn is_kill_sink(&self) -> bool {
        matches!(self, Command::KillSink)
    }

    pub fn is_kill_worker(&self) -> bool {
        matches!(self, Command::KillWorker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kill_sink_round_trips_bit_exact() {
        let encoded = Command::KillSink.encode();
        assert_eq!(encoded, b"CLUSTER_SINK_KILL");
        assert_eq!(Command::decode(&encoded), Command::KillSink);
    }

    #[test]
    fn kill_worker_round_trips_bit_exact() {
        let encoded = Command::KillWorker.encode();
        assert_eq!(encoded, b"CLUSTER_WORKER_KILL");
        assert_eq!(Command::decode(&encoded), Command::KillWorker);
    }

    #[test]
    fn unrecognized_commands_are_unknown_not_errors() {
        let decoded = Command::decode(b"SOME_FUTURE_COMMAND");
        assert_eq!(decoded, Command::Unknown("SOME_FUTURE_COMMAND".to_string()));
        assert!(!decoded.is_kill_sink());
        assert!(!decoded.is_kill_worker());
    }

    #[test]
    fn kill_sent_twice_decodes_identically_each_time() {
        // Property 5: command idempotence — decoding is pure, so sending
        // KILL_SINK twice produces the same Command value both times.
        let a = Command::decode(&Command::KillSink.encode());
        let b = Command::decode(&Command::KillSink.encode());
        assert_eq!(a, b);
    }
}
