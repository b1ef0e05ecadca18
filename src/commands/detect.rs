use crate::annotate::{extract_tir_info, DEFAULT_SCORING, DEFAULT_TIR_LEN};
use crate::cli::DetectArgs;
use crate::detect::{
    candidate::{assemble_candidates, Candidate},
    detect_record, stream_records_into_channel, DetectParams, FAMILIES,
};
use crate::utils::{write_fasta_records, Result, SeqRecord};
use crossbeam_channel::bounded;
use itertools::Itertools;
use rayon::{
    iter::{ParallelBridge, ParallelIterator},
    ThreadPoolBuilder,
};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::thread;

const CHANNEL_BUFFER_SIZE: usize = 64;

type RecordResult = (usize, SeqRecord, Vec<Vec<(usize, usize)>>);

pub fn detect(args: DetectArgs) -> Result<()> {
    let params = DetectParams::new(args.min_len, args.max_len)?;

    let (sender_record, receiver_record) = bounded(CHANNEL_BUFFER_SIZE);
    let in_file = args.in_file.clone();
    let record_stream_thread =
        thread::spawn(move || stream_records_into_channel(&in_file, sender_record));

    log::debug!("Initializing thread pool with {} threads", args.num_threads);
    let pool = ThreadPoolBuilder::new()
        .num_threads(args.num_threads)
        .thread_name(|i| format!("cactascan-{}", i))
        .build()
        .map_err(|e| format!("Failed to initialize thread pool: {}", e))?;

    let detected: Vec<RecordResult> = pool.install(|| {
        receiver_record
            .into_iter()
            .par_bridge()
            .map(|(seq_id, record)| {
                log::info!("Processing '{}' sequence", record.title);
                let pairs = detect_record(record.seq.as_bytes(), &params);
                (seq_id, record, pairs)
            })
            .collect()
    });

    record_stream_thread
        .join()
        .expect("Record stream thread panicked")?;

    // Candidate ids are assigned in a single-threaded merge over records in
    // input order, so output is reproducible regardless of worker scheduling
    let mut next_id = 1u64;
    let mut candidates = Vec::new();
    for (seq_id, record, family_pairs) in detected.iter().sorted_by_key(|(seq_id, ..)| *seq_id) {
        let counts = FAMILIES
            .iter()
            .zip(family_pairs)
            .map(|(family, pairs)| {
                let assembled = assemble_candidates(record, pairs, *seq_id, &mut next_id);
                let count = assembled.len();
                candidates.extend(assembled);
                format!("{} {}", count, family.name)
            })
            .collect_vec();
        log::info!(
            "Found {} matching TIRs in {}",
            counts.join(" and "),
            record.title
        );
    }
    log::info!("Overall, {} CACTA candidates were detected", next_id - 1);

    if args.tir_info {
        for candidate in &mut candidates {
            candidate.title =
                extract_tir_info(&candidate.title, &candidate.seq, DEFAULT_TIR_LEN, &DEFAULT_SCORING);
        }
    }

    if let Some(path) = &args.fasta_out {
        export_fasta(&candidates, path)?;
        log::info!("Candidate sequences are stored in '{}'", path.display());
    }
    if let Some(path) = &args.gff3_out {
        export_gff3(&candidates, path)?;
        log::info!("Candidate annotation is stored in '{}'", path.display());
    }

    Ok(())
}

fn export_fasta(candidates: &[Candidate], path: &Path) -> Result<()> {
    write_fasta_records(
        path,
        candidates.iter().map(|c| (c.title.as_str(), c.seq.as_str())),
    )
}

fn export_gff3(candidates: &[Candidate], path: &Path) -> Result<()> {
    let io_err = |e: std::io::Error| format!("Failed to write {}: {}", path.display(), e);
    let file = File::create(path).map_err(io_err)?;
    let mut handle = BufWriter::new(file);

    writeln!(handle, "##gff-version 3").map_err(io_err)?;
    for c in candidates {
        writeln!(
            handle,
            "{}\tcactascan\tCACTA_TIR_transposon\t{}\t{}\t.\t+\t.\tSeqName={};",
            c.seq_id, c.start, c.end, c.title
        )
        .map_err(io_err)?;
    }

    Ok(())
}
