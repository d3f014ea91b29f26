//! Multi-threaded workloads against a file-backed store. Single-threaded
//! behavior is covered by the unit tests next to each module; these runs
//! hammer the write path from many threads at once.
