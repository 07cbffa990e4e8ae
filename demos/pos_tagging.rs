// Copyright 2024 The indic-pos Authors
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//     http://www.apache.org/licenses/LICENSE-2.0
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

extern crate anyhow;

use indic_pos::pipelines::pos_tagging::POSTaggingPipeline;
use indic_pos::render::render_text;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    //    Set-up pipeline
    let pipeline = POSTaggingPipeline::new(Default::default())?;

    //    Define input
    let input = [
        "मैं स्कूल जा रहा हूँ।",
        "मी शाळेत जातो.",
        "நான் பள்ளிக்கு போகிறேன்.",
    ];

    //    Run pipeline
    for sentence in input {
        println!("{}", render_text(&pipeline.tag(sentence)));
    }

    Ok(())
}
