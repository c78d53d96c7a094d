use anyhow::{bail, Result};

use super::prepare_corpus;
use crate::cli::ShowArgs;
use crate::common::setup_logging;
use crate::corpus::load_all;
use crate::store::CorpusSnapshot;

/// Run the show command: print the matching publication or record as JSON
pub fn run_show(args: ShowArgs) -> Result<()> {
    setup_logging(&args.corpus.log_level)?;
    let dir = prepare_corpus(&args.corpus);

    let report = load_all(&dir)?;
    let snapshot = CorpusSnapshot::build(report.files, 1);

    let json = if args.record {
        match snapshot.find_record(&args.id) {
            Some(found) => serde_json::to_string_pretty(&found)?,
            None => bail!("Record not found: {}", args.id),
        }
    } else {
        match CorpusSnapshot::publication_envelope(snapshot.find_publication_by_id(&args.id)) {
            Some(envelope) => serde_json::to_string_pretty(&envelope)?,
            None => bail!("Publication not found: {}", args.id),
        }
    };

    println!("{}", json);
    Ok(())
}
