// Query engine example
// Author: Gabriel Demetrios Lafis

use std::sync::Arc;

use enem_microdata_api::{
    data::{read_table, TableHandle},
    processing::{QueryEngine, SearchCriteria},
};

const MICRODATA: &str = "\
NU_INSCRICAO,NU_ANO,NU_IDADE,TP_SEXO,TP_COR_RACA,TP_ESCOLA,SG_UF_RESIDENCIA,NU_NOTA_CN,NU_NOTA_CH,NU_NOTA_LC,NU_NOTA_MT,NU_NOTA_REDACAO
190001,2019,17,F,1,3,SP,612.4,598.1,577.0,701.3,880
190002,2019,18,M,3,2,BA,480.2,510.7,495.3,455.9,600
190003,2019,17,F,2,2,RJ,530.0,560.4,540.8,520.6,720
190004,2019,19,M,1,3,SP,590.5,601.2,560.1,688.0,840
190005,2019,18,F,3,2,MG,505.9,540.0,520.2,498.4,680
190006,2019,17,M,4,3,RJ,640.3,630.9,610.0,745.2,920
190007,2019,20,F,5,2,BA,455.1,470.3,480.6,430.8,560
";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let table = read_table(MICRODATA.as_bytes(), ',')?;
    println!("Loaded {} participants", table.len());

    let engine = QueryEngine::new(Arc::new(TableHandle::Ready(table)));

    // Participants from private schools scoring at least 650 in math
    let criteria = SearchCriteria {
        school_type: Some("privada".to_string()),
        math_min: Some(650.0),
        ..Default::default()
    };

    println!("\nPrivate school, math >= 650:");
    for row in engine.search_participants(&criteria, Some(10))? {
        println!(
            "  {} {} {:.1}",
            row.registration.as_deref().unwrap_or("-"),
            row.state.as_deref().unwrap_or("-"),
            row.scores.math
        );
    }

    println!("\nScore statistics:");
    for column in engine.aggregate_statistics()? {
        println!(
            "  {:<16} mean {:>7.2}  median {:>7.2}  std {}",
            column.column,
            column.summary.mean,
            column.summary.median,
            column
                .summary
                .std_dev
                .map(|s| format!("{:.2}", s))
                .unwrap_or_else(|| "-".to_string())
        );
    }

    println!("\nParticipants by race:");
    for count in engine.demographic_distribution("tp_cor_raca")? {
        println!("  {}: {}", count.label(), count.count);
    }

    println!("\nMath ranking by state:");
    for (position, state) in engine.ranking_by_state()?.iter().enumerate() {
        println!("  {}. {} {:.2}", position + 1, state.group, state.mean);
    }

    Ok(())
}
