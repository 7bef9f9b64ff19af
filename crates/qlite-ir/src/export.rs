//! Pluggable text exporters.

use crate::circuit::Circuit;
use crate::program::QProg;

/// What an exporter can be asked to serialize.
#[derive(Debug, Clone, Copy)]
pub enum ExportSource<'a> {
    /// A circuit template or bound circuit.
    Circuit(&'a Circuit),
    /// A fixed-size program.
    Program(&'a QProg),
}

impl<'a> From<&'a Circuit> for ExportSource<'a> {
    fn from(circuit: &'a Circuit) -> Self {
        ExportSource::Circuit(circuit)
    }
}

impl<'a> From<&'a QProg> for ExportSource<'a> {
    fn from(prog: &'a QProg) -> Self {
        ExportSource::Program(prog)
    }
}

/// Converts circuits and programs into an external text format.
pub trait Exporter {
    /// Error produced by this exporter.
    type Error;

    /// Serialize `source`.
    fn export(&self, source: ExportSource<'_>) -> Result<String, Self::Error>;
}

impl Circuit {
    /// Serialize with the given exporter.
    pub fn export_with<E: Exporter>(&self, exporter: &E) -> Result<String, E::Error> {
        exporter.export(ExportSource::Circuit(self))
    }
}

impl QProg {
    /// Serialize with the given exporter.
    pub fn export_with<E: Exporter>(&self, exporter: &E) -> Result<String, E::Error> {
        exporter.export(ExportSource::Program(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{IrError, IrResult};

    struct Listing;

    impl Exporter for Listing {
        type Error = IrError;

        fn export(&self, source: ExportSource<'_>) -> IrResult<String> {
            match source {
                ExportSource::Circuit(c) => c.circuit_str(),
                ExportSource::Program(p) => Ok(p.to_string()),
            }
        }
    }

    #[test]
    fn test_export_with() {
        let mut c = Circuit::new();
        c.x(0).unwrap();
        assert_eq!(c.export_with(&Listing).unwrap(), "x q[0];\n");

        let prog = QProg::new(2, 0);
        assert_eq!(
            prog.export_with(&Listing).unwrap(),
            "2 qubits\n0 cbits\n0 gates\n"
        );
    }
}
