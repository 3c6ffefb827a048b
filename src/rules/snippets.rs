//! Remediation snippets embedded into the binary.
//!
//! Snippets are shipped verbatim from the `snippets/` directory and attached
//! to recommendations; the verbose report mode renders them inline.

pub const MPI_IO_COLLECTIVE_READ: &str = include_str!("../../snippets/mpi-io-collective-read.c");
pub const MPI_IO_COLLECTIVE_WRITE: &str = include_str!("../../snippets/mpi-io-collective-write.c");
pub const MPI_IO_IREAD: &str = include_str!("../../snippets/mpi-io-iread.c");
pub const MPI_IO_IWRITE: &str = include_str!("../../snippets/mpi-io-iwrite.c");
pub const MPI_IO_HINTS: &str = include_str!("../../snippets/mpi-io-hints.bash");
pub const LUSTRE_STRIPING: &str = include_str!("../../snippets/lustre-striping.bash");
pub const HDF5_ALIGNMENT: &str = include_str!("../../snippets/hdf5-alignment.c");
pub const HDF5_CACHE: &str = include_str!("../../snippets/hdf5-cache.c");
pub const HDF5_COLLECTIVE_METADATA: &str =
    include_str!("../../snippets/hdf5-collective-metadata.c");
pub const HDF5_VOL_ASYNC_READ: &str = include_str!("../../snippets/hdf5-vol-async-read.c");
pub const HDF5_VOL_ASYNC_WRITE: &str = include_str!("../../snippets/hdf5-vol-async-write.c");
