/*
 * SPDX-FileCopyrightText: Copyright (c) 2023 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
 * SPDX-License-Identifier: MIT
 *
 * Permission is hereby granted, free of charge, to any person obtaining a
 * copy of this software and associated documentation files (the "Software"),
 * to deal in the Software without restriction, including without limitation
 * the rights to use, copy, modify, merge, publish, distribute, sublicense,
 * and/or sell copies of the Software, and to permit persons to whom the
 * Software is furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in
 * all copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL
 * THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
 * FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
 * DEALINGS IN THE SOFTWARE.
 */
use super::{ProductInfo, Resource};
use crate::model::{memory as wire_memory, processor as wire_processor};

impl_inventory_mapping! {
    pub struct Processor from wire_processor::Processor {
        resource: Resource => into,
        product_info: ProductInfo => into,
        socket: Option<String>,
        processor_type: Option<String>,
        processor_architecture: Option<String>,
        instruction_set: Option<String>,
        max_speed_mhz: Option<i64>,
        total_cores: Option<i64>,
        total_threads: Option<i64>,
        processor_id: Option<ProcessorId> => map,
    }
}

impl_inventory_mapping! {
    pub struct ProcessorId from wire_processor::ProcessorId {
        vendor_id: Option<String>,
        microcode_info: Option<String>,
        step: Option<String>,
        identification_registers: Option<String>,
        effective_family: Option<String>,
        effective_model: Option<String>,
    }
}

impl_inventory_mapping! {
    /// One DIMM slot
    pub struct Memory from wire_memory::Memory {
        resource: Resource => into,
        product_info: ProductInfo => into,
        capacity_mib: Option<i64>,
        operating_speed_mhz: Option<i64>,
        memory_device_type: Option<String>,
        data_width_bits: Option<i64>,
        rank_count: Option<i64>,
        device_locator: Option<String>,
        memory_location: Option<MemoryLocation> => map,
    }
}

impl_inventory_mapping! {
    pub struct MemoryLocation from wire_memory::MemoryLocation {
        socket: Option<i64>,
        controller: Option<i64>,
        channel: Option<i64>,
        slot: Option<i64>,
    }
}
